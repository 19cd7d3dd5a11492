//! Battery level handling.
//!
//! - `meter`: level to meter fill and color tier
//! - `reconnect`: per-source last-seen level and reconnect detection

mod meter;
mod reconnect;

pub use meter::{BatteryLevel, ColorTier, MeterGeometry, MeterOrientation, fill_extent, render};
pub use reconnect::{Observation, ReconnectTracker, SharedReconnectTracker, SourceState};
