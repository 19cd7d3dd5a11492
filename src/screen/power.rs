//! Display power policy.
//!
//! The screen turns off after [`IDLE_TIMEOUT_SECS`](crate::config::IDLE_TIMEOUT_SECS)
//! without activity and back on when the user types or a peripheral
//! reconnects. Time is passed in as milliseconds so the same logic runs
//! against `embassy_time::Instant` on target and a plain counter on the host.

/// Decide whether the screen should be on from the base power state and the
/// idle timeout. A timeout of 0 disables idle blanking.
pub const fn screen_should_be_on(
    base_display_on: bool,
    idle_secs: u64,
    timeout_secs: u64,
) -> bool {
    if !base_display_on {
        return false;
    }
    if timeout_secs > 0 && idle_secs >= timeout_secs {
        return false;
    }
    true
}

/// Screen on/off change reported by [`DisplayPower`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerTransition {
    TurnedOn,
    TurnedOff,
}

/// Idle tracking for the display backlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayPower {
    timeout_secs: u64,
    last_activity_ms: u64,
    base_on: bool,
    on: bool,
}

impl DisplayPower {
    /// Screen on, idle clock started at `now_ms`.
    pub const fn new(
        timeout_secs: u64,
        now_ms: u64,
    ) -> Self {
        Self {
            timeout_secs,
            last_activity_ms: now_ms,
            base_on: true,
            on: true,
        }
    }

    /// User activity or a wake request: restart the idle clock.
    pub fn activity(
        &mut self,
        now_ms: u64,
    ) -> Option<PowerTransition> {
        self.last_activity_ms = now_ms;
        self.update(now_ms)
    }

    /// Force the display off (e.g. host suspended) or allow it back on.
    pub fn set_base_on(
        &mut self,
        base_on: bool,
        now_ms: u64,
    ) -> Option<PowerTransition> {
        self.base_on = base_on;
        self.update(now_ms)
    }

    /// Periodic check; reports when the screen should change state.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> Option<PowerTransition> {
        self.update(now_ms)
    }

    #[inline]
    pub const fn is_on(&self) -> bool { self.on }

    /// Seconds since the last activity.
    pub const fn idle_secs(
        &self,
        now_ms: u64,
    ) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms) / 1000
    }

    fn update(
        &mut self,
        now_ms: u64,
    ) -> Option<PowerTransition> {
        let on = screen_should_be_on(self.base_on, self.idle_secs(now_ms), self.timeout_secs);
        if on == self.on {
            return None;
        }
        self.on = on;

        #[cfg(feature = "defmt")]
        defmt::info!("display {}", if on { "on" } else { "off" });

        Some(if on { PowerTransition::TurnedOn } else { PowerTransition::TurnedOff })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_should_be_on() {
        assert!(screen_should_be_on(true, 0, 300));
        assert!(screen_should_be_on(true, 299, 300));
        assert!(!screen_should_be_on(true, 300, 300));
        assert!(!screen_should_be_on(false, 0, 300));
        assert!(screen_should_be_on(true, 10_000, 0), "0 disables the timeout");
    }

    #[test]
    fn test_idle_timeout_turns_off() {
        let mut power = DisplayPower::new(10, 0);
        assert_eq!(power.tick(9_999), None);
        assert_eq!(power.tick(10_000), Some(PowerTransition::TurnedOff));
        assert!(!power.is_on());
        assert_eq!(power.tick(20_000), None, "only transitions are reported");
    }

    #[test]
    fn test_activity_wakes() {
        let mut power = DisplayPower::new(10, 0);
        power.tick(15_000);
        assert_eq!(power.activity(16_000), Some(PowerTransition::TurnedOn));
        assert_eq!(power.tick(25_999), None);
        assert_eq!(power.tick(26_000), Some(PowerTransition::TurnedOff));
    }

    #[test]
    fn test_base_off_overrides_activity() {
        let mut power = DisplayPower::new(10, 0);
        assert_eq!(power.set_base_on(false, 0), Some(PowerTransition::TurnedOff));
        assert_eq!(power.activity(1_000), None);
        assert_eq!(power.set_base_on(true, 1_000), Some(PowerTransition::TurnedOn));
    }

    #[test]
    fn test_clock_going_backwards_is_not_idle() {
        let power = DisplayPower::new(10, 5_000);
        assert_eq!(power.idle_secs(1_000), 0);
    }
}
