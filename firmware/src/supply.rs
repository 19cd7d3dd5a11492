//! Power supply sensing: VBUS presence and the dongle's own battery level.
//!
//! Both are pure so they can be tested on the host; the firmware tasks feed
//! them raw GPIO levels, ADC readings and `embassy_time` milliseconds.

use crate::board::VBUS_DEBOUNCE_MS;

// =============================================================================
// VBUS Debounce
// =============================================================================

/// VBUS presence with time-based debounce.
///
/// The first sample is reported as-is; after that a new level is reported
/// once it has held for [`VBUS_DEBOUNCE_MS`].
pub struct VbusDebounce {
    stable: Option<bool>,
    candidate: bool,
    candidate_since_ms: u64,
}

impl VbusDebounce {
    pub const fn new() -> Self {
        Self {
            stable: None,
            candidate: false,
            candidate_since_ms: 0,
        }
    }

    /// Feed one sample. Returns the new presence when it changes.
    pub fn update(
        &mut self,
        high: bool,
        now_ms: u64,
    ) -> Option<bool> {
        let Some(stable) = self.stable else {
            self.stable = Some(high);
            self.candidate = high;
            return Some(high);
        };

        if high != self.candidate {
            self.candidate = high;
            self.candidate_since_ms = now_ms;
            return None;
        }

        if high != stable && now_ms.saturating_sub(self.candidate_since_ms) >= VBUS_DEBOUNCE_MS {
            self.stable = Some(high);
            return Some(high);
        }
        None
    }

    #[inline]
    pub const fn present(&self) -> Option<bool> { self.stable }
}

impl Default for VbusDebounce {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Battery Level
// =============================================================================

/// ADC reference voltage in millivolts.
const ADC_REFERENCE_MV: u32 = 3_300;

/// Full-scale reading of the 12-bit ADC.
const ADC_FULL_SCALE: u32 = 4_096;

/// VSYS reaches the ADC through a 1:3 divider.
const VSYS_DIVIDER: u32 = 3;

/// Cell voltage reported as 1 %.
pub const CELL_EMPTY_MV: u32 = 3_300;

/// Cell voltage reported as 100 %.
pub const CELL_FULL_MV: u32 = 4_200;

/// VSYS in millivolts from a raw ADC3 reading.
pub const fn vsys_millivolts(raw: u16) -> u32 { raw as u32 * ADC_REFERENCE_MV * VSYS_DIVIDER / ADC_FULL_SCALE }

/// Battery percentage for a VSYS voltage, linear between
/// [`CELL_EMPTY_MV`] and [`CELL_FULL_MV`].
///
/// Never returns 0: the screen reads 0 % as "source disconnected", and a
/// dongle that is measuring its own supply is clearly running.
pub const fn percent_from_millivolts(mv: u32) -> u8 {
    if mv >= CELL_FULL_MV {
        return 100;
    }
    if mv <= CELL_EMPTY_MV {
        return 1;
    }
    let percent = (mv - CELL_EMPTY_MV) * 100 / (CELL_FULL_MV - CELL_EMPTY_MV);
    if percent == 0 { 1 } else { percent as u8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_reported() {
        let mut vbus = VbusDebounce::new();
        assert_eq!(vbus.present(), None);
        assert_eq!(vbus.update(true, 0), Some(true));
        assert_eq!(vbus.present(), Some(true));
        assert_eq!(vbus.update(true, 50), None, "unchanged level is not reported again");
    }

    #[test]
    fn test_change_reported_after_debounce() {
        let mut vbus = VbusDebounce::new();
        vbus.update(false, 0);
        assert_eq!(vbus.update(true, 100), None);
        assert_eq!(vbus.update(true, 200), None);
        assert_eq!(vbus.update(true, 100 + VBUS_DEBOUNCE_MS), Some(true));
        assert_eq!(vbus.update(true, 400), None);
    }

    #[test]
    fn test_glitch_ignored() {
        let mut vbus = VbusDebounce::new();
        vbus.update(true, 0);
        assert_eq!(vbus.update(false, 50), None);
        assert_eq!(vbus.update(true, 100), None, "back to the stable level");
        assert_eq!(vbus.update(true, 1_000), None);
        assert_eq!(vbus.present(), Some(true));
    }

    #[test]
    fn test_vsys_conversion() {
        assert_eq!(vsys_millivolts(0), 0);
        // 4.2 V / 3 = 1.4 V -> 1.4 / 3.3 * 4096 = 1737.7
        assert_eq!(vsys_millivolts(1738), 4_200);
        assert_eq!(vsys_millivolts(4095), 9_897);
    }

    #[test]
    fn test_percent_bounds() {
        assert_eq!(percent_from_millivolts(0), 1);
        assert_eq!(percent_from_millivolts(CELL_EMPTY_MV), 1);
        assert_eq!(percent_from_millivolts(CELL_EMPTY_MV + 5), 1, "never 0 while running");
        assert_eq!(percent_from_millivolts(3_750), 50);
        assert_eq!(percent_from_millivolts(CELL_FULL_MV), 100);
        assert_eq!(percent_from_millivolts(5_000), 100, "USB-powered VSYS reads full");
    }

    #[test]
    fn test_percent_monotonic() {
        let mut last = 0;
        for mv in (3_000..4_500).step_by(10) {
            let percent = percent_from_millivolts(mv);
            assert!(percent >= last, "{mv} mV");
            last = percent;
        }
    }
}
