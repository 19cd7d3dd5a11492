//! Scripted demo: a repeating timeline of keyboard events.
//!
//! Walks through every widget state the screen can show: battery tiers, a
//! disconnect and reconnect, BLE profiles in each link state, layer labels,
//! held modifiers, USB power, and two malformed reports for the diagnostics
//! log. WPM follows a slow sine wave in between.

use dongle_screen::StatusEvent;
use dongle_screen::events::{ModifierMask, OutputState};
use heapless::Vec;

use crate::timing::{SCRIPT_STEP_FRAMES, WPM_SAMPLE_FRAMES};

// =============================================================================
// Script
// =============================================================================

/// One scripted step.
#[derive(Clone, Copy, Debug)]
enum Step {
    Peripheral { index: u8, level: u8 },
    Central(u8),
    Layer(u8, &'static str),
    Modifiers(u8),
    Output(OutputState),
    UsbPower(bool),
    /// Report from a source id the screen doesn't know.
    UnknownSource,
}

impl Step {
    /// Event for this step. `None` when the build has no slot for it.
    fn event(self) -> Option<StatusEvent> {
        match self {
            Self::Peripheral { index, level } => Some(StatusEvent::peripheral_battery(index, level)),
            Self::Central(level) => StatusEvent::central_battery(level),
            Self::Layer(index, label) => Some(StatusEvent::layer(index, Some(label))),
            Self::Modifiers(bits) => Some(StatusEvent::Modifiers(ModifierMask(bits))),
            Self::Output(state) => Some(StatusEvent::Output(state)),
            Self::UsbPower(present) => Some(StatusEvent::UsbPower { present }),
            Self::UnknownSource => Some(StatusEvent::BatteryLevel { source: 200, level: 50 }),
        }
    }
}

const SCRIPT: [Step; 20] = [
    Step::Peripheral { index: 0, level: 85 },
    Step::Peripheral { index: 1, level: 62 },
    Step::Layer(1, "NAV"),
    Step::Modifiers(ModifierMask::LEFT_SHIFT),
    Step::Output(OutputState::ble(0, true, true)),
    Step::Peripheral { index: 1, level: 25 },
    Step::Modifiers(ModifierMask::LEFT_CTRL | ModifierMask::RIGHT_ALT),
    Step::Layer(2, ""),
    Step::Peripheral { index: 1, level: 8 },
    Step::Output(OutputState::ble(1, true, false)),
    Step::Peripheral { index: 1, level: 0 },
    Step::UsbPower(true),
    Step::Output(OutputState::ble(2, false, false)),
    Step::Modifiers(0),
    Step::Peripheral { index: 1, level: 70 },
    Step::UnknownSource,
    Step::Peripheral { index: 0, level: 150 },
    Step::Output(OutputState::usb(true)),
    Step::Layer(0, "BASE"),
    Step::Central(40),
];

// =============================================================================
// Scenario Player
// =============================================================================

/// Plays [`SCRIPT`] in a loop, one step every [`SCRIPT_STEP_FRAMES`].
pub struct Scenario {
    frame: u32,
    step: usize,
}

impl Scenario {
    pub const fn new() -> Self { Self { frame: 0, step: 0 } }

    /// Advance one frame and return the events due on it.
    pub fn advance(&mut self) -> Vec<StatusEvent, 2> {
        let mut events = Vec::new();

        if self.frame.is_multiple_of(SCRIPT_STEP_FRAMES) {
            if let Some(event) = SCRIPT[self.step].event() {
                events.push(event).ok();
            }
            self.step = (self.step + 1) % SCRIPT.len();
        }
        if self.frame.is_multiple_of(WPM_SAMPLE_FRAMES) {
            events.push(StatusEvent::Wpm(fake_wpm(self.frame))).ok();
        }

        self.frame = self.frame.wrapping_add(1);
        events
    }

    /// Index of the next scripted step.
    #[inline]
    pub const fn step(&self) -> usize { self.step }
}

impl Default for Scenario {
    fn default() -> Self { Self::new() }
}

/// Typing speed swinging between 0 and 180 WPM over about 30 seconds.
fn fake_wpm(frame: u32) -> u16 {
    let phase = frame as f32 * 0.004;
    ((phase.sin() + 1.0) * 90.0) as u16
}
