//! Battery widget: one column per battery source.
//!
//! Each column shows the level label ("%4u", or "X" when unknown) above a
//! small battery glyph with the meter inside. A column stays hidden until its
//! source reports for the first time.
//!
//! # Layout
//!
//! ```text
//! +-------------+-------------+
//! |      85     |      12     |   label row, BATTERY_LABEL_HEIGHT
//! |  [=======]  |  [==     ]  |   glyph row, METER_HEIGHT + 4
//! +-------------+-------------+
//! ```
//!
//! The two rows are centered vertically in the band; columns split the band
//! width evenly.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::primitives::{battery_meter_rect, battery_shell_size, clear_area, draw_battery_shell, draw_text, fill_rect};
use crate::battery::{BatteryLevel, ColorTier, MeterGeometry, MeterOrientation, ReconnectTracker, SourceState, render};
use crate::colors::Theme;
use crate::config::{BATTERY_LABEL_HEIGHT, METER_HEIGHT, METER_WIDTH};
use crate::diagnostics::Notice;
use crate::events::{EventKind, StatusEvent};
use crate::screen::{RenderUpdate, StatusListener};
use crate::styles::{CENTERED, font_for_height};
use crate::error::Error;
use crate::thresholds::is_critical_battery;

/// Height of the glyph row under the label.
const GLYPH_ROW_HEIGHT: u32 = METER_HEIGHT + 4;

/// Label shown for unknown levels.
const UNKNOWN_LABEL: &str = "X";

/// Label text for a raw level: right aligned to four characters, or "X".
pub fn level_label(level: u8) -> String<4> {
    let mut text = String::new();
    match BatteryLevel::from_report(level) {
        BatteryLevel::Percent(p) => {
            let _ = write!(text, "{p:4}");
        }
        BatteryLevel::Unknown => {
            let _ = text.push_str(UNKNOWN_LABEL);
        }
    }
    text
}

/// Label color: critical levels use the low-tier color, unknown levels the
/// error color, everything else the foreground.
pub const fn label_color(
    level: u8,
    theme: &Theme,
) -> Rgb565 {
    match BatteryLevel::from_report(level) {
        BatteryLevel::Unknown => theme.error_color(),
        _ if is_critical_battery(level) => theme.tier_color(ColorTier::Low),
        _ => theme.foreground,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Column {
    level: u8,
    visible: bool,
}

/// Battery band for `N` sources.
pub struct BatteryWidget<const N: usize> {
    area: Rectangle,
    columns: [Column; N],
    tracker: ReconnectTracker<N>,
    /// Source that is the dongle itself, if shown. Gets the USB power mark.
    dongle_source: Option<u8>,
    usb_present: bool,
}

impl<const N: usize> BatteryWidget<N> {
    pub const fn new(
        area: Rectangle,
        dongle_source: Option<u8>,
    ) -> Self {
        Self {
            area,
            columns: [Column { level: 0, visible: false }; N],
            tracker: ReconnectTracker::new(),
            dongle_source,
            usb_present: false,
        }
    }

    #[inline]
    pub const fn area(&self) -> Rectangle { self.area }

    /// Last level of `source`, `None` while hidden or out of range.
    pub fn level(
        &self,
        source: u8,
    ) -> Option<u8> {
        self.columns
            .get(source as usize)
            .filter(|column| column.visible)
            .map(|column| column.level)
    }

    pub fn is_visible(
        &self,
        source: u8,
    ) -> bool {
        self.level(source).is_some()
    }

    /// Events rejected for an out-of-range source.
    #[inline]
    pub const fn rejected_sources(&self) -> u32 { self.tracker.rejected() }

    #[inline]
    pub const fn usb_present(&self) -> bool { self.usb_present }

    /// Area of column `index`.
    pub fn column_rect(
        &self,
        index: usize,
    ) -> Rectangle {
        let width = self.area.size.width / N.max(1) as u32;
        Rectangle::new(
            Point::new(self.area.top_left.x + (index as u32 * width) as i32, self.area.top_left.y),
            Size::new(width, self.area.size.height),
        )
    }

    /// Top-left corner of the battery glyph in column `index`.
    pub fn shell_origin(
        &self,
        index: usize,
    ) -> Point {
        let column = self.column_rect(index);
        let shell = battery_shell_size(METER_WIDTH, METER_HEIGHT);
        let top = self.content_top();
        Point::new(
            column.top_left.x + (column.size.width.saturating_sub(shell.width) / 2) as i32,
            top + BATTERY_LABEL_HEIGHT as i32 + ((GLYPH_ROW_HEIGHT - shell.height) / 2) as i32,
        )
    }

    /// Meter rectangle inside the glyph of column `index`.
    pub fn meter_rect(
        &self,
        index: usize,
    ) -> Rectangle {
        battery_meter_rect(self.shell_origin(index), METER_WIDTH, METER_HEIGHT)
    }

    /// Meter fill of column `index` for its current level.
    pub fn meter(
        &self,
        index: usize,
    ) -> MeterGeometry {
        let level = self.columns.get(index).map_or(0, |column| column.level);
        render(BatteryLevel::from_report(level), self.meter_rect(index), MeterOrientation::Horizontal)
    }

    /// Top of the label row, with both rows centered in the band.
    fn content_top(&self) -> i32 {
        let content = BATTERY_LABEL_HEIGHT + GLYPH_ROW_HEIGHT;
        self.area.top_left.y + (self.area.size.height.saturating_sub(content) / 2) as i32
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_area(display, self.area, theme.background);

        let font = font_for_height(BATTERY_LABEL_HEIGHT);
        for (index, column) in self.columns.iter().enumerate() {
            if !column.visible {
                continue;
            }

            let rect = self.column_rect(index);
            let label_center = Point::new(
                rect.center().x,
                self.content_top() + BATTERY_LABEL_HEIGHT as i32 - font.character_size.height as i32 / 2 - 1,
            );
            draw_text(
                display,
                &level_label(column.level),
                label_center,
                font,
                label_color(column.level, theme),
                CENTERED,
            );

            let origin = self.shell_origin(index);
            draw_battery_shell(display, origin, METER_WIDTH, METER_HEIGHT, theme.foreground);
            if let MeterGeometry::Filled { fill, tier } = self.meter(index) {
                fill_rect(display, fill, theme.tier_color(tier));
            }

            if self.usb_present && self.dongle_source == Some(index as u8) {
                draw_usb_mark(display, origin, theme.foreground);
            }
        }
    }
}

/// Small plus sign right of a battery glyph: the dongle is on USB power.
fn draw_usb_mark<D>(
    display: &mut D,
    shell_origin: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let shell = battery_shell_size(METER_WIDTH, METER_HEIGHT);
    let x = shell_origin.x + shell.width as i32 + 2;
    let y = shell_origin.y;
    let arm = shell.height as i32;
    fill_rect(display, Rectangle::new(Point::new(x, y + arm / 2), Size::new(shell.height, 1)), color);
    fill_rect(display, Rectangle::new(Point::new(x + arm / 2, y), Size::new(1, shell.height)), color);
}

impl<const N: usize> StatusListener for BatteryWidget<N> {
    fn subscriptions(&self) -> &'static [EventKind] { &[EventKind::BatteryLevel, EventKind::UsbPower] }

    fn on_event(
        &mut self,
        event: &StatusEvent,
    ) -> RenderUpdate {
        match *event {
            StatusEvent::BatteryLevel { source, level } => {
                let observation = match self.tracker.observe(source, level).map_err(Error::from) {
                    Ok(observation) => observation,
                    Err(err) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("battery event ignored: {}", err);
                        return RenderUpdate::NONE.with_notice(Notice::for_error(source, err));
                    }
                };

                let column = &mut self.columns[source as usize];
                let changed = !column.visible || column.level != level;
                column.level = level;
                column.visible = true;

                let notice = match BatteryLevel::try_from_report(level) {
                    Err(err) => Notice::for_error(source, err),
                    Ok(_) if observation.reconnect => Some(Notice::Reconnect { source }),
                    Ok(BatteryLevel::Unknown) if observation.previous == SourceState::Connected => {
                        Some(Notice::Disconnect { source })
                    }
                    Ok(_) => None,
                };

                RenderUpdate::redraw_if(changed)
                    .with_wake(observation.reconnect)
                    .with_notice(notice)
            }
            StatusEvent::UsbPower { present } => {
                let changed = present != self.usb_present;
                self.usb_present = present;
                // Only the dongle column shows USB power, and only once visible.
                let shown = self.dongle_source.is_some_and(|source| self.is_visible(source));
                RenderUpdate::redraw_if(changed && shown)
            }
            _ => RenderUpdate::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, WHITE, YELLOW};

    fn band() -> Rectangle { Rectangle::new(Point::new(0, 160), Size::new(280, 40)) }

    #[test]
    fn test_level_label() {
        assert_eq!(level_label(85), "  85");
        assert_eq!(level_label(100), " 100");
        assert_eq!(level_label(5), "   5");
        assert_eq!(level_label(0), "X");
        assert_eq!(level_label(150), "X");
    }

    #[test]
    fn test_label_color() {
        let theme = Theme::DARK;
        assert_eq!(label_color(50, &theme), WHITE);
        assert_eq!(label_color(11, &theme), WHITE);
        assert_eq!(label_color(10, &theme), YELLOW);
        assert_eq!(label_color(1, &theme), YELLOW);
        assert_eq!(label_color(0, &theme), RED);
        assert_eq!(label_color(150, &theme), RED, "out-of-range level uses the error color");
        assert_eq!(label_color(0, &theme.monochrome()), WHITE);
    }

    #[test]
    fn test_columns_hidden_until_first_event() {
        let mut widget = BatteryWidget::<2>::new(band(), None);
        assert!(!widget.is_visible(0));
        assert!(!widget.is_visible(1));

        let update = widget.on_event(&StatusEvent::BatteryLevel { source: 1, level: 64 });
        assert!(update.redraw);
        assert!(update.wake, "first valid report is a reconnect");
        assert_eq!(update.notice, Some(Notice::Reconnect { source: 1 }));
        assert!(!widget.is_visible(0));
        assert_eq!(widget.level(1), Some(64));
    }

    #[test]
    fn test_disconnect_then_reconnect() {
        let mut widget = BatteryWidget::<2>::new(band(), None);
        widget.on_event(&StatusEvent::BatteryLevel { source: 0, level: 45 });

        let update = widget.on_event(&StatusEvent::BatteryLevel { source: 0, level: 0 });
        assert!(update.redraw);
        assert!(!update.wake);
        assert_eq!(update.notice, Some(Notice::Disconnect { source: 0 }));
        assert_eq!(widget.meter(0), MeterGeometry::Unavailable);

        let update = widget.on_event(&StatusEvent::BatteryLevel { source: 0, level: 40 });
        assert!(update.wake);

        let update = widget.on_event(&StatusEvent::BatteryLevel { source: 0, level: 39 });
        assert!(!update.wake);
        assert_eq!(update.notice, None);
    }

    #[test]
    fn test_invalid_source_is_counted_not_drawn() {
        let mut widget = BatteryWidget::<2>::new(band(), None);
        let update = widget.on_event(&StatusEvent::BatteryLevel { source: 2, level: 50 });
        assert!(!update.redraw);
        assert_eq!(update.notice, Some(Notice::InvalidSource { source: 2, source_count: 2 }));
        assert_eq!(widget.rejected_sources(), 1);
        assert!(!widget.is_visible(0) && !widget.is_visible(1));
    }

    #[test]
    fn test_out_of_range_level() {
        let mut widget = BatteryWidget::<2>::new(band(), None);
        let update = widget.on_event(&StatusEvent::BatteryLevel { source: 0, level: 120 });
        assert_eq!(update.notice, Some(Notice::OutOfRangeLevel { source: 0, level: 120 }));
        assert_eq!(widget.meter(0), MeterGeometry::Unavailable);
    }

    #[test]
    fn test_out_of_range_level_after_connect_is_not_a_disconnect() {
        let mut widget = BatteryWidget::<2>::new(band(), None);
        widget.on_event(&StatusEvent::BatteryLevel { source: 1, level: 80 });
        let update = widget.on_event(&StatusEvent::BatteryLevel { source: 1, level: 255 });
        assert!(update.redraw);
        assert_eq!(update.notice, Some(Notice::OutOfRangeLevel { source: 1, level: 255 }));
        assert_eq!(widget.level(1), Some(255));
    }

    #[test]
    fn test_geometry_fits_columns() {
        let widget = BatteryWidget::<2>::new(band(), None);
        assert_eq!(widget.column_rect(1).top_left.x, 140);
        for index in 0..2 {
            let column = widget.column_rect(index);
            let meter = widget.meter_rect(index);
            assert!(column.contains(meter.top_left));
            assert!(column.contains(meter.bottom_right().unwrap()));
            assert_eq!(meter.size, Size::new(METER_WIDTH, METER_HEIGHT));
        }
    }

    #[test]
    fn test_meter_uses_level() {
        let mut widget = BatteryWidget::<2>::new(band(), None);
        widget.on_event(&StatusEvent::BatteryLevel { source: 0, level: 50 });
        let meter = widget.meter(0);
        assert_eq!(meter.filled_width(), 13);
        assert_eq!(meter.tier(), ColorTier::Normal);
    }

    #[test]
    fn test_usb_power_redraws_visible_dongle_only() {
        let mut widget = BatteryWidget::<3>::new(band(), Some(0));
        assert!(!widget.on_event(&StatusEvent::UsbPower { present: true }).redraw, "dongle column hidden");
        assert!(widget.usb_present());

        widget.on_event(&StatusEvent::BatteryLevel { source: 0, level: 90 });
        assert!(widget.on_event(&StatusEvent::UsbPower { present: false }).redraw);
        assert!(!widget.on_event(&StatusEvent::UsbPower { present: false }).redraw);

        let mut without_dongle = BatteryWidget::<2>::new(band(), None);
        without_dongle.on_event(&StatusEvent::BatteryLevel { source: 0, level: 90 });
        assert!(!without_dongle.on_event(&StatusEvent::UsbPower { present: true }).redraw);
    }
}
