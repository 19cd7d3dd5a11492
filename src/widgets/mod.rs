//! Status widgets for the dongle screen.
//!
//! - [`wpm`]: typing speed glyph and counter
//! - [`output`]: USB / BLE profile and link state
//! - [`layer`]: active layer name or index
//! - [`modifiers`]: held modifier symbols
//! - [`battery`]: per-source level labels and meters
//! - [`primitives`]: shared low-level drawing utilities
//!
//! # Architecture
//!
//! Each widget owns the state it displays and the rectangle it was placed in.
//! It reacts to events through [`StatusListener`] and draws itself into any
//! `DrawTarget<Color = Rgb565>`, always clearing its area first so it can be
//! redrawn alone. [`StatusWidget`] wraps the concrete widgets so the screen
//! can keep them in one fixed-capacity list without trait objects.

pub mod battery;
pub mod layer;
pub mod modifiers;
pub mod output;
pub mod primitives;
pub mod wpm;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

pub use battery::BatteryWidget;
pub use layer::LayerWidget;
pub use modifiers::ModifiersWidget;
pub use output::OutputWidget;
pub use wpm::WpmWidget;

use crate::colors::Theme;
use crate::config::{BATTERY_SOURCE_COUNT, DONGLE_SOURCE_OFFSET};
use crate::events::{EventKind, StatusEvent};
use crate::layout::WidgetKind;
use crate::screen::{Placement, RenderUpdate, StatusListener};

/// Battery widget sized for the configured sources.
pub type ConfiguredBatteryWidget = BatteryWidget<BATTERY_SOURCE_COUNT>;

/// Any status widget.
pub enum StatusWidget {
    Wpm(WpmWidget),
    Output(OutputWidget),
    Layer(LayerWidget),
    Modifiers(ModifiersWidget),
    Battery(ConfiguredBatteryWidget),
}

impl StatusWidget {
    /// Build the widget for a placement.
    pub fn from_placement(placement: &Placement) -> Self {
        let area = placement.area;
        match placement.kind {
            WidgetKind::Wpm => Self::Wpm(WpmWidget::new(area)),
            WidgetKind::Output => Self::Output(OutputWidget::new(area)),
            WidgetKind::Layer => Self::Layer(LayerWidget::new(area)),
            WidgetKind::Modifiers => Self::Modifiers(ModifiersWidget::new(area)),
            WidgetKind::Battery => {
                let dongle_source = if DONGLE_SOURCE_OFFSET > 0 { Some(0) } else { None };
                Self::Battery(BatteryWidget::new(area, dongle_source))
            }
        }
    }

    pub const fn kind(&self) -> WidgetKind {
        match self {
            Self::Wpm(_) => WidgetKind::Wpm,
            Self::Output(_) => WidgetKind::Output,
            Self::Layer(_) => WidgetKind::Layer,
            Self::Modifiers(_) => WidgetKind::Modifiers,
            Self::Battery(_) => WidgetKind::Battery,
        }
    }

    pub const fn area(&self) -> Rectangle {
        match self {
            Self::Wpm(w) => w.area(),
            Self::Output(w) => w.area(),
            Self::Layer(w) => w.area(),
            Self::Modifiers(w) => w.area(),
            Self::Battery(w) => w.area(),
        }
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            Self::Wpm(w) => w.draw(display, theme),
            Self::Output(w) => w.draw(display, theme),
            Self::Layer(w) => w.draw(display, theme),
            Self::Modifiers(w) => w.draw(display, theme),
            Self::Battery(w) => w.draw(display, theme),
        }
    }
}

impl StatusListener for StatusWidget {
    fn subscriptions(&self) -> &'static [EventKind] {
        match self {
            Self::Wpm(w) => w.subscriptions(),
            Self::Output(w) => w.subscriptions(),
            Self::Layer(w) => w.subscriptions(),
            Self::Modifiers(w) => w.subscriptions(),
            Self::Battery(w) => w.subscriptions(),
        }
    }

    fn on_event(
        &mut self,
        event: &StatusEvent,
    ) -> RenderUpdate {
        match self {
            Self::Wpm(w) => w.on_event(event),
            Self::Output(w) => w.on_event(event),
            Self::Layer(w) => w.on_event(event),
            Self::Modifiers(w) => w.on_event(event),
            Self::Battery(w) => w.on_event(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(kind: WidgetKind) -> Placement {
        Placement {
            kind,
            area: Rectangle::new(Point::new(0, 40), Size::new(280, 40)),
        }
    }

    #[test]
    fn test_from_placement_keeps_kind_and_area() {
        for kind in WidgetKind::ALL {
            let widget = StatusWidget::from_placement(&placement(kind));
            assert_eq!(widget.kind(), kind);
            assert_eq!(widget.area(), placement(kind).area);
        }
    }

    #[test]
    fn test_subscriptions() {
        let subs = |kind| StatusWidget::from_placement(&placement(kind)).subscriptions();
        assert_eq!(subs(WidgetKind::Wpm), &[EventKind::Wpm]);
        assert_eq!(subs(WidgetKind::Output), &[EventKind::Output]);
        assert_eq!(subs(WidgetKind::Layer), &[EventKind::Layer]);
        assert_eq!(subs(WidgetKind::Modifiers), &[EventKind::Modifiers]);
        assert_eq!(subs(WidgetKind::Battery), &[EventKind::BatteryLevel, EventKind::UsbPower]);
    }
}
