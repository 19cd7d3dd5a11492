//! Async tasks for the dongle screen firmware.
//!
//! - `display`: drains `STATUS_EVENTS` into the status screen and drives the backlight
//! - `vbus`: reports USB power changes
//! - `supply`: reports the dongle's own battery (with `dongle-battery`)

pub mod display;
#[cfg(feature = "dongle-battery")]
pub mod supply;
pub mod vbus;

pub use display::display_task;
#[cfg(feature = "dongle-battery")]
pub use supply::supply_task;
pub use vbus::vbus_task;
