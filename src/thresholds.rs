//! Centralized status threshold configuration.
//!
//! All thresholds are compile-time constants with validation assertions, so
//! the meter tiers, the WPM speed glyph and the widget labels agree.
//!
//! # Compile-Time Validation
//!
//! Each threshold group includes `const` assertions that verify ordering at
//! compile time. A swapped pair (e.g. `CRITICAL >= LOW`) fails the build.

use crate::battery::{BatteryLevel, ColorTier};

// =============================================================================
// Battery Level Thresholds (percent)
// =============================================================================

/// Highest level drawn in the low tier (11-30% = YELLOW).
/// Above this value the meter uses the normal color.
pub const BATTERY_LOW_MAX: u8 = 30;

/// Highest level drawn in the critical tier (<=10% = RED).
pub const BATTERY_CRITICAL_MAX: u8 = 10;

/// Lowest level a connected source reports. Anything below means disconnected.
pub const BATTERY_CONNECTED_MIN: u8 = 1;

/// Full charge.
pub const BATTERY_FULL: u8 = 100;

const _: () = assert!(BATTERY_CONNECTED_MIN <= BATTERY_CRITICAL_MAX);
const _: () = assert!(BATTERY_CRITICAL_MAX < BATTERY_LOW_MAX);
const _: () = assert!(BATTERY_LOW_MAX < BATTERY_FULL);

/// Check if a raw battery report lands in the critical tier. Disconnected and
/// out-of-range reports count as critical, matching the meter.
#[inline]
pub const fn is_critical_battery(level: u8) -> bool {
    matches!(ColorTier::for_level(BatteryLevel::from_report(level)), ColorTier::Critical)
}

// =============================================================================
// Typing Speed Thresholds (words per minute)
// =============================================================================

/// Above this the WPM widget shows the medium speed glyph.
pub const WPM_MEDIUM: u16 = 100;

/// Above this the WPM widget shows the fast speed glyph.
pub const WPM_FAST: u16 = 150;

/// Values at or above this are treated as bogus and shown as slow.
/// The counter text is clamped to it.
pub const WPM_LIMIT: u16 = 9999;

const _: () = assert!(WPM_MEDIUM < WPM_FAST);
const _: () = assert!(WPM_FAST < WPM_LIMIT);

// =============================================================================
// Unit Tests
// =============================================================================
