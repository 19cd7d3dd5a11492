//! Typing speed widget.
//!
//! Shows a three-bar speed glyph and the current WPM, zero padded to three
//! digits, inside a 1px frame.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::primitives::{clear_area, draw_frame, draw_level_bars, draw_text};
use crate::colors::{GRAY, Theme};
use crate::events::{EventKind, StatusEvent};
use crate::screen::{RenderUpdate, StatusListener};
use crate::styles::{RIGHT_ALIGNED, counter_font_for_height};
use crate::thresholds::{WPM_FAST, WPM_LIMIT, WPM_MEDIUM};

/// Inner padding between the frame and the contents.
const PADDING: i32 = 4;

/// Speed class shown by the glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedTier {
    Slow,
    Medium,
    Fast,
}

impl SpeedTier {
    /// Tier for a WPM reading. Readings at or above [`WPM_LIMIT`] are bogus
    /// and count as slow.
    pub const fn for_wpm(wpm: u16) -> Self {
        if wpm >= WPM_LIMIT {
            Self::Slow
        } else if wpm > WPM_FAST {
            Self::Fast
        } else if wpm > WPM_MEDIUM {
            Self::Medium
        } else {
            Self::Slow
        }
    }

    /// Lit bars in the glyph.
    pub const fn bars(self) -> u32 {
        match self {
            Self::Slow => 1,
            Self::Medium => 2,
            Self::Fast => 3,
        }
    }
}

/// Counter text: at least three digits, zero padded, clamped to [`WPM_LIMIT`].
pub fn wpm_text(wpm: u16) -> String<8> {
    let mut text = String::new();
    let _ = write!(text, "{:03}", wpm.min(WPM_LIMIT));
    text
}

pub struct WpmWidget {
    area: Rectangle,
    wpm: u16,
}

impl WpmWidget {
    pub const fn new(area: Rectangle) -> Self { Self { area, wpm: 0 } }

    #[inline]
    pub const fn area(&self) -> Rectangle { self.area }

    #[inline]
    pub const fn wpm(&self) -> u16 { self.wpm }

    #[inline]
    pub const fn tier(&self) -> SpeedTier { SpeedTier::for_wpm(self.wpm) }

    pub fn draw<D>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_area(display, self.area, theme.background);
        draw_frame(display, self.area, theme.foreground);

        let inner = self.area.offset(-PADDING);
        if inner.is_zero_sized() {
            return;
        }
        let font = counter_font_for_height(self.area.size.height);

        // Glyph on the left, one glyph-width square.
        let glyph_size = font.character_size.height.min(inner.size.height);
        let glyph = Rectangle::new(
            Point::new(inner.top_left.x, inner.center().y - (glyph_size / 2) as i32),
            Size::new(glyph_size, glyph_size),
        );
        draw_level_bars(display, glyph, self.tier().bars(), 3, theme.foreground, GRAY);

        let right = Point::new(inner.top_left.x + inner.size.width as i32 - 1, inner.center().y);
        draw_text(display, &wpm_text(self.wpm), right, font, theme.foreground, RIGHT_ALIGNED);
    }
}

impl StatusListener for WpmWidget {
    fn subscriptions(&self) -> &'static [EventKind] { &[EventKind::Wpm] }

    fn on_event(
        &mut self,
        event: &StatusEvent,
    ) -> RenderUpdate {
        match *event {
            StatusEvent::Wpm(wpm) => {
                let changed = wpm != self.wpm;
                self.wpm = wpm;
                RenderUpdate::redraw_if(changed)
            }
            _ => RenderUpdate::NONE,
        }
    }
}
