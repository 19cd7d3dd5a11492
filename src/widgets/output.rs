//! Output (endpoint) widget.
//!
//! Shows where keystrokes go: "USB", or the active BLE profile with a marker
//! for its link state. Right aligned in its cell.
//!
//! | State | Text | Marker |
//! |-------|------|--------|
//! | USB | `USB` | filled dot when HID is ready, ring otherwise |
//! | BLE connected | `BT1`..`BT5` | filled dot |
//! | BLE bonded, not connected | `BT1`..`BT5` | ring |
//! | BLE open (not bonded) | `BT1`..`BT5` | plus |

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use heapless::String;

use super::primitives::{clear_area, draw_text};
use crate::colors::{BLUE, ORANGE, Theme};
use crate::events::{EventKind, OutputState, StatusEvent, Transport};
use crate::screen::{RenderUpdate, StatusListener};
use crate::styles::{RIGHT_ALIGNED, font_for_height};

/// Right padding of the text.
const PADDING: i32 = 4;

/// What the output cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    Usb { hid_ready: bool },
    Connected { profile: u8 },
    Bonded { profile: u8 },
    Open { profile: u8 },
}

impl LinkStatus {
    pub const fn from_state(state: &OutputState) -> Self {
        let profile = state.profile_index;
        match state.transport {
            Transport::Usb => Self::Usb {
                hid_ready: state.usb_hid_ready,
            },
            Transport::Ble if !state.bonded => Self::Open { profile },
            Transport::Ble if state.connected => Self::Connected { profile },
            Transport::Ble => Self::Bonded { profile },
        }
    }

    /// Cell text. BLE profiles are shown 1-based.
    pub fn text(&self) -> String<8> {
        let mut text = String::new();
        let _ = match *self {
            Self::Usb { .. } => write!(text, "USB"),
            Self::Connected { profile } | Self::Bonded { profile } | Self::Open { profile } => {
                write!(text, "BT{}", u16::from(profile) + 1)
            }
        };
        text
    }

    /// Marker color in `theme`.
    const fn marker_color(
        &self,
        theme: &Theme,
    ) -> Rgb565 {
        if !theme.color_capable {
            return theme.foreground;
        }
        match self {
            Self::Connected { .. } => BLUE,
            Self::Bonded { .. } => ORANGE,
            Self::Usb { .. } | Self::Open { .. } => theme.foreground,
        }
    }
}

pub struct OutputWidget {
    area: Rectangle,
    state: OutputState,
}

impl OutputWidget {
    pub const fn new(area: Rectangle) -> Self {
        Self {
            area,
            state: OutputState::usb(false),
        }
    }

    #[inline]
    pub const fn area(&self) -> Rectangle { self.area }

    #[inline]
    pub const fn status(&self) -> LinkStatus { LinkStatus::from_state(&self.state) }

    pub fn draw<D>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_area(display, self.area, theme.background);

        let status = self.status();
        let text = status.text();
        let font = font_for_height(self.area.size.height);
        let center_y = self.area.center().y;
        let right = self.area.top_left.x + self.area.size.width as i32 - 1 - PADDING;
        draw_text(display, &text, Point::new(right, center_y), font, theme.foreground, RIGHT_ALIGNED);

        // Marker left of the text, one glyph wide.
        let text_width = (font.character_size.width + font.character_spacing) * text.len() as u32;
        let diameter = font.character_size.height / 2;
        let marker_right = right - text_width as i32 - font.character_size.width as i32 / 2;
        let marker_left = marker_right - diameter as i32;
        if marker_left < self.area.top_left.x || diameter < 3 {
            return;
        }
        let top_left = Point::new(marker_left, center_y - diameter as i32 / 2);
        let color = status.marker_color(theme);
        let circle = Circle::new(top_left, diameter);

        match status {
            LinkStatus::Connected { .. } | LinkStatus::Usb { hid_ready: true } => {
                circle.into_styled(PrimitiveStyle::with_fill(color)).draw(display).ok();
            }
            LinkStatus::Bonded { .. } | LinkStatus::Usb { hid_ready: false } => {
                circle.into_styled(PrimitiveStyle::with_stroke(color, 1)).draw(display).ok();
            }
            LinkStatus::Open { .. } => {
                let c = circle.center();
                let r = (diameter / 2) as i32;
                let style = PrimitiveStyle::with_stroke(color, 1);
                Line::new(Point::new(c.x - r, c.y), Point::new(c.x + r, c.y))
                    .into_styled(style)
                    .draw(display)
                    .ok();
                Line::new(Point::new(c.x, c.y - r), Point::new(c.x, c.y + r))
                    .into_styled(style)
                    .draw(display)
                    .ok();
            }
        }
    }
}

impl StatusListener for OutputWidget {
    fn subscriptions(&self) -> &'static [EventKind] { &[EventKind::Output] }

    fn on_event(
        &mut self,
        event: &StatusEvent,
    ) -> RenderUpdate {
        match event {
            StatusEvent::Output(state) => {
                let changed = LinkStatus::from_state(state) != self.status();
                self.state = *state;
                RenderUpdate::redraw_if(changed)
            }
            _ => RenderUpdate::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;

    #[test]
    fn test_link_status() {
        assert_eq!(LinkStatus::from_state(&OutputState::usb(true)), LinkStatus::Usb { hid_ready: true });
        assert_eq!(
            LinkStatus::from_state(&OutputState::ble(0, true, true)),
            LinkStatus::Connected { profile: 0 }
        );
        assert_eq!(
            LinkStatus::from_state(&OutputState::ble(2, true, false)),
            LinkStatus::Bonded { profile: 2 }
        );
        assert_eq!(
            LinkStatus::from_state(&OutputState::ble(4, false, true)),
            LinkStatus::Open { profile: 4 },
            "an unbonded profile is open even if a link is up"
        );
    }

    #[test]
    fn test_text() {
        assert_eq!(LinkStatus::Usb { hid_ready: false }.text(), "USB");
        assert_eq!(LinkStatus::Connected { profile: 0 }.text(), "BT1");
        assert_eq!(LinkStatus::Open { profile: 4 }.text(), "BT5");
    }

    #[test]
    fn test_marker_color_follows_theme() {
        let bonded = LinkStatus::Bonded { profile: 1 };
        assert_eq!(bonded.marker_color(&Theme::DARK), ORANGE);
        assert_eq!(bonded.marker_color(&Theme::DARK.monochrome()), WHITE);
    }

    #[test]
    fn test_redraw_only_when_status_changes() {
        let mut widget = OutputWidget::new(Rectangle::new(Point::new(105, 0), Size::new(175, 40)));
        assert!(widget.on_event(&StatusEvent::Output(OutputState::ble(1, true, true))).redraw);
        assert!(!widget.on_event(&StatusEvent::Output(OutputState::ble(1, true, true))).redraw);
        assert!(widget.on_event(&StatusEvent::Output(OutputState::ble(1, true, false))).redraw);
        assert_eq!(widget.status(), LinkStatus::Bonded { profile: 1 });
    }
}
