//! Keyboard bindings that stand in for the keyboard firmware.
//!
//! | Key | Event |
//! |-----|-------|
//! | W | WPM +20 (wraps to 0 past 200) |
//! | L | next layer |
//! | M | next modifier combination |
//! | O | next output / BLE profile state |
//! | B, N | peripheral 0 / 1 battery -15%, 0% disconnects, next press reconnects at 100% |
//! | C | dongle battery, same as B (with `dongle-battery`) |
//! | U | toggle USB power |
//! | R | out-of-range level (120%) from peripheral 0 |
//! | X | report from an unknown source |

use dongle_screen::StatusEvent;
use dongle_screen::config::PERIPHERAL_COUNT;
use dongle_screen::events::{ModifierMask, OutputState};
use embedded_graphics_simulator::sdl2::Keycode;

const WPM_STEP: u16 = 20;
const WPM_WRAP: u16 = 200;
const BATTERY_STEP: u8 = 15;

const LAYERS: [&str; 5] = ["BASE", "NAV", "SYM", "FN", ""];

const MODIFIERS: [u8; 5] = [
    0,
    ModifierMask::LEFT_SHIFT,
    ModifierMask::LEFT_CTRL | ModifierMask::LEFT_ALT,
    ModifierMask::RIGHT_GUI,
    ModifierMask::LEFT_CTRL | ModifierMask::LEFT_SHIFT | ModifierMask::RIGHT_ALT | ModifierMask::LEFT_GUI,
];

const OUTPUTS: [OutputState; 5] = [
    OutputState::usb(true),
    OutputState::usb(false),
    OutputState::ble(0, true, true),
    OutputState::ble(1, true, false),
    OutputState::ble(4, false, false),
];

/// State behind the simulated keyboard, advanced by key presses.
pub struct KeyboardState {
    wpm: u16,
    layer: usize,
    modifiers: usize,
    output: usize,
    peripherals: [u8; PERIPHERAL_COUNT],
    central: u8,
    usb_present: bool,
}

impl KeyboardState {
    pub const fn new() -> Self {
        Self {
            wpm: 0,
            layer: 0,
            modifiers: 0,
            output: 0,
            peripherals: [0; PERIPHERAL_COUNT],
            central: 0,
            usb_present: false,
        }
    }

    /// Event for a key press, `None` for unbound keys.
    pub fn on_key(
        &mut self,
        keycode: Keycode,
    ) -> Option<StatusEvent> {
        match keycode {
            Keycode::W => {
                self.wpm = (self.wpm + WPM_STEP) % (WPM_WRAP + WPM_STEP);
                Some(StatusEvent::Wpm(self.wpm))
            }
            Keycode::L => {
                self.layer = (self.layer + 1) % LAYERS.len();
                Some(StatusEvent::layer(self.layer as u8, Some(LAYERS[self.layer])))
            }
            Keycode::M => {
                self.modifiers = (self.modifiers + 1) % MODIFIERS.len();
                Some(StatusEvent::Modifiers(ModifierMask(MODIFIERS[self.modifiers])))
            }
            Keycode::O => {
                self.output = (self.output + 1) % OUTPUTS.len();
                Some(StatusEvent::Output(OUTPUTS[self.output]))
            }
            Keycode::B => self.drain_peripheral(0),
            Keycode::N => self.drain_peripheral(1),
            Keycode::C => {
                self.central = next_level(self.central);
                StatusEvent::central_battery(self.central)
            }
            Keycode::U => {
                self.usb_present = !self.usb_present;
                Some(StatusEvent::UsbPower {
                    present: self.usb_present,
                })
            }
            Keycode::R => Some(StatusEvent::peripheral_battery(0, 120)),
            Keycode::X => Some(StatusEvent::BatteryLevel { source: 200, level: 50 }),
            _ => None,
        }
    }

    fn drain_peripheral(
        &mut self,
        index: usize,
    ) -> Option<StatusEvent> {
        let level = self.peripherals.get_mut(index)?;
        *level = next_level(*level);
        Some(StatusEvent::peripheral_battery(index as u8, *level))
    }
}

impl Default for KeyboardState {
    fn default() -> Self { Self::new() }
}

/// Discharge by one step; an empty battery comes back full.
const fn next_level(level: u8) -> u8 {
    if level == 0 { 100 } else { level.saturating_sub(BATTERY_STEP) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_cycle_disconnects_and_reconnects() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.on_key(Keycode::B), Some(StatusEvent::peripheral_battery(0, 100)));
        for _ in 0..6 {
            keys.on_key(Keycode::B);
        }
        assert_eq!(keys.on_key(Keycode::B), Some(StatusEvent::peripheral_battery(0, 0)));
        assert_eq!(keys.on_key(Keycode::B), Some(StatusEvent::peripheral_battery(0, 100)));
    }

    #[test]
    fn test_wpm_wraps() {
        let mut keys = KeyboardState::new();
        let mut last = 0;
        for _ in 0..(WPM_WRAP / WPM_STEP) {
            if let Some(StatusEvent::Wpm(wpm)) = keys.on_key(Keycode::W) {
                last = wpm;
            }
        }
        assert_eq!(last, WPM_WRAP);
        assert_eq!(keys.on_key(Keycode::W), Some(StatusEvent::Wpm(0)));
    }

    #[test]
    fn test_layer_cycle() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.on_key(Keycode::L), Some(StatusEvent::layer(1, Some("NAV"))));
        for _ in 0..LAYERS.len() - 1 {
            keys.on_key(Keycode::L);
        }
        assert_eq!(keys.layer, 1);
    }

    #[test]
    fn test_usb_toggle() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.on_key(Keycode::U), Some(StatusEvent::UsbPower { present: true }));
        assert_eq!(keys.on_key(Keycode::U), Some(StatusEvent::UsbPower { present: false }));
    }

    #[test]
    fn test_unbound_key() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.on_key(Keycode::Q), None);
    }
}
