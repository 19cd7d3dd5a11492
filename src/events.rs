//! Status events fed to the screen.
//!
//! Keyboard firmware (BLE/USB endpoint logic, HID processing, battery
//! reporting) lives elsewhere; it pushes [`StatusEvent`]s into
//! [`STATUS_EVENTS`] and the display task drains them in order.
//!
//! # Battery Sources
//!
//! Battery events carry a *source* index that maps directly to a column in
//! the battery band. When the `dongle-battery` feature is on, the dongle's own
//! battery is source 0 and peripheral `n` becomes source `n + 1`; use
//! [`StatusEvent::peripheral_battery`] and [`StatusEvent::central_battery`]
//! rather than building the variant by hand.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use crate::config::{BLE_PROFILE_COUNT, DONGLE_SOURCE_OFFSET, EVENT_QUEUE_DEPTH, LAYER_LABEL_LENGTH};

// =============================================================================
// Event Types
// =============================================================================

/// A change in keyboard state the screen may need to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusEvent {
    /// Battery state of charge for a source. 0 means disconnected.
    BatteryLevel { source: u8, level: u8 },
    /// USB power on the dongle changed.
    UsbPower { present: bool },
    /// Highest active layer changed.
    Layer {
        index: u8,
        label: Option<String<LAYER_LABEL_LENGTH>>,
    },
    /// Selected endpoint or BLE profile state changed.
    Output(OutputState),
    /// Explicit modifier state changed.
    Modifiers(ModifierMask),
    /// Words per minute changed.
    Wpm(u16),
}

/// Discriminant of [`StatusEvent`], used for subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    BatteryLevel,
    UsbPower,
    Layer,
    Output,
    Modifiers,
    Wpm,
}

impl EventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::BatteryLevel,
        Self::UsbPower,
        Self::Layer,
        Self::Output,
        Self::Modifiers,
        Self::Wpm,
    ];

    /// Position in dispatch tables.
    #[inline]
    pub const fn index(self) -> usize { self as usize }
}

impl StatusEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::BatteryLevel { .. } => EventKind::BatteryLevel,
            Self::UsbPower { .. } => EventKind::UsbPower,
            Self::Layer { .. } => EventKind::Layer,
            Self::Output(_) => EventKind::Output,
            Self::Modifiers(_) => EventKind::Modifiers,
            Self::Wpm(_) => EventKind::Wpm,
        }
    }

    /// Battery report from split peripheral `index`, shifted past the dongle's
    /// own source when that is shown.
    pub const fn peripheral_battery(
        index: u8,
        level: u8,
    ) -> Self {
        Self::BatteryLevel {
            source: index.saturating_add(DONGLE_SOURCE_OFFSET as u8),
            level,
        }
    }

    /// Battery report from the dongle itself. `None` when the dongle battery
    /// isn't shown.
    pub const fn central_battery(level: u8) -> Option<Self> {
        if DONGLE_SOURCE_OFFSET == 0 {
            None
        } else {
            Some(Self::BatteryLevel { source: 0, level })
        }
    }

    /// Layer event with a label, truncated to the label capacity.
    pub fn layer(
        index: u8,
        label: Option<&str>,
    ) -> Self {
        let label = label.map(|name| {
            let mut truncated = String::new();
            for c in name.chars() {
                if truncated.push(c).is_err() {
                    break;
                }
            }
            truncated
        });
        Self::Layer { index, label }
    }
}

// =============================================================================
// Output State
// =============================================================================

/// Transport of the selected endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transport {
    #[default]
    Usb,
    Ble,
}

/// Endpoint selection and the active BLE profile's link state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputState {
    pub transport: Transport,
    /// Active BLE profile, `0..BLE_PROFILE_COUNT`.
    pub profile_index: u8,
    pub connected: bool,
    pub bonded: bool,
    pub usb_hid_ready: bool,
}

impl OutputState {
    /// USB selected.
    pub const fn usb(hid_ready: bool) -> Self {
        Self {
            transport: Transport::Usb,
            profile_index: 0,
            connected: false,
            bonded: false,
            usb_hid_ready: hid_ready,
        }
    }

    /// BLE selected on `profile_index`. Out-of-range profiles are clamped to the last one.
    pub const fn ble(
        profile_index: u8,
        bonded: bool,
        connected: bool,
    ) -> Self {
        let last = BLE_PROFILE_COUNT - 1;
        Self {
            transport: Transport::Ble,
            profile_index: if profile_index > last { last } else { profile_index },
            connected,
            bonded,
            usb_hid_ready: false,
        }
    }
}

// =============================================================================
// Modifier Mask
// =============================================================================

/// HID modifier byte: bits 0-3 left Ctrl/Shift/Alt/Gui, bits 4-7 right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModifierMask(pub u8);

impl ModifierMask {
    pub const LEFT_CTRL: u8 = 0x01;
    pub const LEFT_SHIFT: u8 = 0x02;
    pub const LEFT_ALT: u8 = 0x04;
    pub const LEFT_GUI: u8 = 0x08;
    pub const RIGHT_CTRL: u8 = 0x10;
    pub const RIGHT_SHIFT: u8 = 0x20;
    pub const RIGHT_ALT: u8 = 0x40;
    pub const RIGHT_GUI: u8 = 0x80;

    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn ctrl(self) -> bool { self.0 & (Self::LEFT_CTRL | Self::RIGHT_CTRL) != 0 }

    #[inline]
    pub const fn shift(self) -> bool { self.0 & (Self::LEFT_SHIFT | Self::RIGHT_SHIFT) != 0 }

    #[inline]
    pub const fn alt(self) -> bool { self.0 & (Self::LEFT_ALT | Self::RIGHT_ALT) != 0 }

    #[inline]
    pub const fn gui(self) -> bool { self.0 & (Self::LEFT_GUI | Self::RIGHT_GUI) != 0 }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }
}

// =============================================================================
// Event Channel
// =============================================================================

/// Channel type carrying status events to the display task.
pub type StatusEventChannel = Channel<CriticalSectionRawMutex, StatusEvent, EVENT_QUEUE_DEPTH>;

/// Status events for the display task. Producers `send`/`try_send`; the
/// display task is the only receiver.
pub static STATUS_EVENTS: StatusEventChannel = Channel::new();
