//! Modifier widget: held Ctrl/Shift/Alt/Gui, either side, joined by spaces.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::primitives::{clear_area, draw_centered_text};
use crate::colors::Theme;
use crate::events::{EventKind, ModifierMask, StatusEvent};
use crate::screen::{RenderUpdate, StatusListener};
use crate::styles::font_for_height;

/// Longest possible text: all four symbols and three separators.
pub const MODIFIER_TEXT_LENGTH: usize = 18;

/// Text shown before the first modifier event.
const PLACEHOLDER: &str = "-";

/// Display order and symbol for each modifier.
const SYMBOLS: [(fn(ModifierMask) -> bool, &str); 4] = [
    (ModifierMask::ctrl, "Ctrl"),
    (ModifierMask::shift, "Shift"),
    (ModifierMask::alt, "Alt"),
    (ModifierMask::gui, "Gui"),
];

/// Symbols of the held modifiers joined by a space; empty when none.
pub fn modifier_text(mask: ModifierMask) -> String<MODIFIER_TEXT_LENGTH> {
    let mut text = String::new();
    for (held, symbol) in SYMBOLS {
        if !held(mask) {
            continue;
        }
        if !text.is_empty() {
            let _ = text.push(' ');
        }
        let _ = text.push_str(symbol);
    }
    text
}

pub struct ModifiersWidget {
    area: Rectangle,
    mask: Option<ModifierMask>,
}

impl ModifiersWidget {
    pub const fn new(area: Rectangle) -> Self { Self { area, mask: None } }

    #[inline]
    pub const fn area(&self) -> Rectangle { self.area }

    /// Text currently shown.
    pub fn text(&self) -> String<MODIFIER_TEXT_LENGTH> {
        match self.mask {
            Some(mask) => modifier_text(mask),
            None => {
                let mut text = String::new();
                let _ = text.push_str(PLACEHOLDER);
                text
            }
        }
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_area(display, self.area, theme.background);
        let text = self.text();
        if text.is_empty() {
            return;
        }
        let font = font_for_height(self.area.size.height);
        draw_centered_text(display, &text, self.area, font, theme.foreground);
    }
}

impl StatusListener for ModifiersWidget {
    fn subscriptions(&self) -> &'static [EventKind] { &[EventKind::Modifiers] }

    fn on_event(
        &mut self,
        event: &StatusEvent,
    ) -> RenderUpdate {
        match *event {
            StatusEvent::Modifiers(mask) => {
                // Left/right variants of the same modifier look identical.
                let changed = self.mask.is_none_or(|old| modifier_text(old) != modifier_text(mask));
                self.mask = Some(mask);
                RenderUpdate::redraw_if(changed)
            }
            _ => RenderUpdate::NONE,
        }
    }
}
