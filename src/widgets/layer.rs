//! Active layer widget: the layer's name, or its index when it has none.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::primitives::{clear_area, draw_centered_text};
use crate::colors::Theme;
use crate::config::LAYER_LABEL_LENGTH;
use crate::events::{EventKind, StatusEvent};
use crate::screen::{RenderUpdate, StatusListener};
use crate::styles::font_for_height;

/// Text shown before the first layer event.
const PLACEHOLDER: &str = "-";

pub struct LayerWidget {
    area: Rectangle,
    text: String<LAYER_LABEL_LENGTH>,
}

impl LayerWidget {
    pub fn new(area: Rectangle) -> Self {
        let mut text = String::new();
        let _ = text.push_str(PLACEHOLDER);
        Self { area, text }
    }

    #[inline]
    pub const fn area(&self) -> Rectangle { self.area }

    #[inline]
    pub fn text(&self) -> &str { &self.text }

    pub fn draw<D>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_area(display, self.area, theme.background);
        let font = font_for_height(self.area.size.height);
        draw_centered_text(display, &self.text, self.area, font, theme.foreground);
    }
}

/// Layer text: the label (already at most [`LAYER_LABEL_LENGTH`] chars), or
/// the decimal index.
pub fn layer_text(
    index: u8,
    label: Option<&str>,
) -> String<LAYER_LABEL_LENGTH> {
    let mut text = String::new();
    match label {
        Some(label) if !label.is_empty() => {
            for c in label.chars() {
                if text.push(c).is_err() {
                    break;
                }
            }
        }
        _ => {
            let _ = write!(text, "{index}");
        }
    }
    text
}

impl StatusListener for LayerWidget {
    fn subscriptions(&self) -> &'static [EventKind] { &[EventKind::Layer] }

    fn on_event(
        &mut self,
        event: &StatusEvent,
    ) -> RenderUpdate {
        match event {
            StatusEvent::Layer { index, label } => {
                let text = layer_text(*index, label.as_deref());
                let changed = text != self.text;
                self.text = text;
                RenderUpdate::redraw_if(changed)
            }
            _ => RenderUpdate::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_text() {
        assert_eq!(layer_text(0, Some("BASE")), "BASE");
        assert_eq!(layer_text(3, None), "3");
        assert_eq!(layer_text(12, Some("")), "12", "empty label falls back to the index");
        assert_eq!(layer_text(1, Some("SYMBOLS_AND_NUMBERS")), "SYMBOLS_AND_");
    }

    #[test]
    fn test_placeholder_until_first_event() {
        let mut widget = LayerWidget::new(Rectangle::new(Point::new(0, 40), Size::new(280, 80)));
        assert_eq!(widget.text(), "-");
        assert!(widget.on_event(&StatusEvent::layer(2, Some("NAV"))).redraw);
        assert_eq!(widget.text(), "NAV");
        assert!(!widget.on_event(&StatusEvent::layer(2, Some("NAV"))).redraw);
        assert!(widget.on_event(&StatusEvent::layer(0, None)).redraw);
        assert_eq!(widget.text(), "0");
    }
}
