//! Low-level drawing primitives shared across widgets.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Text, TextStyle};

use crate::styles::{filled, outline};

/// Fill a widget's area with the background color.
pub fn clear_area<D>(
    display: &mut D,
    area: Rectangle,
    bg_color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    area.into_styled(PrimitiveStyle::with_fill(bg_color)).draw(display).ok();
}

/// Draw a 1px frame along the inside edge of `area`.
pub fn draw_frame<D>(
    display: &mut D,
    area: Rectangle,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if area.size.width < 2 || area.size.height < 2 {
        return;
    }
    area.into_styled(outline(color)).draw(display).ok();
}

/// Draw `text` at `position` in `font`/`color` with the given alignment.
pub fn draw_text<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb565,
    alignment: TextStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(text, position, MonoTextStyle::new(font, color), alignment)
        .draw(display)
        .ok();
}

/// Draw text centered in `area`.
pub fn draw_centered_text<D>(
    display: &mut D,
    text: &str,
    area: Rectangle,
    font: &MonoFont<'_>,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_text(display, text, area.center(), font, color, crate::styles::CENTERED);
}

/// Draw a filled rectangle.
pub fn fill_rect<D>(
    display: &mut D,
    rect: Rectangle,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if rect.is_zero_sized() {
        return;
    }
    rect.into_styled(filled(color)).draw(display).ok();
}

// =============================================================================
// Battery Shell
// =============================================================================

/// Outer size of a battery shell around a `meter_width` x `meter_height` meter:
/// one pixel of frame on every side plus a one pixel terminal nub on the left.
pub const fn battery_shell_size(
    meter_width: u32,
    meter_height: u32,
) -> Size {
    Size::new(meter_width + 3, meter_height + 2)
}

/// Meter rectangle inside a shell whose top-left corner is `origin`.
pub const fn battery_meter_rect(
    origin: Point,
    meter_width: u32,
    meter_height: u32,
) -> Rectangle {
    Rectangle::new(Point::new(origin.x + 2, origin.y + 1), Size::new(meter_width, meter_height))
}

/// Draw the battery outline: body frame plus the terminal nub on the left.
pub fn draw_battery_shell<D>(
    display: &mut D,
    origin: Point,
    meter_width: u32,
    meter_height: u32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let body = Rectangle::new(
        Point::new(origin.x + 1, origin.y),
        Size::new(meter_width + 2, meter_height + 2),
    );
    body.into_styled(outline(color)).draw(display).ok();

    // Terminal nub, inset one pixel from top and bottom.
    if meter_height > 0 {
        let nub = Rectangle::new(Point::new(origin.x, origin.y + 1), Size::new(1, meter_height));
        fill_rect(display, nub, color);
    }
}

/// Vertical level bars, `filled` of `total` lit, growing in height left to right.
/// Used as the speed glyph of the WPM widget.
pub fn draw_level_bars<D>(
    display: &mut D,
    area: Rectangle,
    filled_bars: u32,
    total: u32,
    on_color: Rgb565,
    off_color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if total == 0 || area.size.width < total * 2 || area.size.height == 0 {
        return;
    }
    let slot = area.size.width / total;
    let bar_width = (slot - 1).max(1);
    for i in 0..total {
        let height = (area.size.height * (i + 1) / total).max(1);
        let top = area.top_left.y + (area.size.height - height) as i32;
        let bar = Rectangle::new(
            Point::new(area.top_left.x + (i * slot) as i32, top),
            Size::new(bar_width, height),
        );
        let color = if i < filled_bars { on_color } else { off_color };
        fill_rect(display, bar, color);
    }
}
