//! Debug page: frame timing, event counters, power state and the notice log.

use core::fmt::Write;

use dongle_screen::StatusScreen;
use dongle_screen::colors::{BLACK, GRAY, GREEN, ORANGE, WHITE, YELLOW};
use dongle_screen::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use dongle_screen::diagnostics::EventLog;
use dongle_screen::layout::WidgetKind;
use dongle_screen::screen::DisplayPower;
use dongle_screen::styles::{LEFT_ALIGNED, SMALL_FONT};
use dongle_screen::widgets::StatusWidget;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::metrics::SimMetrics;

const HEADER_Y: i32 = 12;
const HEADER_DIVIDER_Y: i32 = 18;
const SECTION_HEADER_Y: i32 = 28;
/// Vertical middle of the first stat line.
const STATS_Y: i32 = 37;
const LOG_DIVIDER_Y: i32 = 120;
/// Vertical middle of the first log line.
const LOG_Y: i32 = 127;
const LOG_LINE_HEIGHT: i32 = 12;
const COL1_X: i32 = 4;
const COL2_X: i32 = 96;
const COL3_X: i32 = 188;
const STAT_LINE_HEIGHT: i32 = 13;

const DEBUG_BG: Rgb565 = BLACK;
const HEADER_COLOR: Rgb565 = GREEN;
const SECTION_COLOR: Rgb565 = GRAY;
const VALUE_COLOR: Rgb565 = WHITE;
const HIGHLIGHT_COLOR: Rgb565 = YELLOW;
const LOG_PROMPT_COLOR: Rgb565 = GREEN;
const LOG_TEXT_COLOR: Rgb565 = ORANGE;
const DIVIDER_COLOR: Rgb565 = GRAY;

/// Everything the debug page shows, gathered by the main loop.
pub struct DebugSnapshot<'a> {
    pub metrics: &'a SimMetrics,
    pub screen: &'a StatusScreen,
    pub power: &'a DisplayPower,
    pub now_ms: u64,
    pub idle_timeout_secs: u64,
    pub script_on: bool,
    pub fps: f32,
}

pub fn draw_debug_page(
    display: &mut SimulatorDisplay<Rgb565>,
    snapshot: &DebugSnapshot<'_>,
) {
    display.clear(DEBUG_BG).ok();
    draw_header(display, snapshot);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_section_headers(display);
    draw_timing_column(display, snapshot.metrics);
    draw_events_column(display, snapshot);
    draw_power_column(display, snapshot);
    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, snapshot.screen.diagnostics());
}

fn draw_header(
    display: &mut SimulatorDisplay<Rgb565>,
    snapshot: &DebugSnapshot<'_>,
) {
    let header_style = MonoTextStyle::new(SMALL_FONT, HEADER_COLOR);
    let info_style = MonoTextStyle::new(SMALL_FONT, VALUE_COLOR);

    Text::new("DEBUG VIEW", Point::new(COL1_X, HEADER_Y), header_style)
        .draw(display)
        .ok();

    let mut uptime: String<24> = String::new();
    let _ = write!(uptime, "UP {}", snapshot.metrics.uptime_string());
    Text::new(&uptime, Point::new(110, HEADER_Y), info_style)
        .draw(display)
        .ok();

    let mut fps: String<12> = String::new();
    let _ = write!(fps, "{:.0} FPS", snapshot.fps);
    Text::new(&fps, Point::new(226, HEADER_Y), info_style)
        .draw(display)
        .ok();
}

fn draw_section_headers(display: &mut SimulatorDisplay<Rgb565>) {
    let style = MonoTextStyle::new(SMALL_FONT, SECTION_COLOR);
    Text::new("TIMING", Point::new(COL1_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
    Text::new("EVENTS", Point::new(COL2_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
    Text::new("POWER", Point::new(COL3_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
}

/// Left-aligned small text with its vertical middle on `y`.
fn row_text<'a>(
    text: &'a str,
    x: i32,
    y: i32,
    style: MonoTextStyle<'static, Rgb565>,
) -> Text<'a, MonoTextStyle<'static, Rgb565>> {
    Text::with_text_style(text, Point::new(x, y), style, LEFT_ALIGNED)
}

/// Draw `lines` top to bottom starting at `x`, [`STATS_Y`].
fn draw_stat_lines(
    display: &mut SimulatorDisplay<Rgb565>,
    x: i32,
    lines: &[(String<16>, bool)],
) {
    let value_style = MonoTextStyle::new(SMALL_FONT, VALUE_COLOR);
    let highlight_style = MonoTextStyle::new(SMALL_FONT, HIGHLIGHT_COLOR);

    let mut y = STATS_Y;
    for (text, highlight) in lines {
        let style = if *highlight { highlight_style } else { value_style };
        row_text(text, x, y, style).draw(display).ok();
        y += STAT_LINE_HEIGHT;
    }
}

fn stat(args: core::fmt::Arguments<'_>) -> String<16> {
    let mut s = String::new();
    let _ = s.write_fmt(args);
    s
}

fn draw_timing_column(
    display: &mut SimulatorDisplay<Rgb565>,
    metrics: &SimMetrics,
) {
    let ms = |us: u32| us as f32 / 1000.0;
    let lines = [
        (stat(format_args!("Frame: {:.1}ms", ms(metrics.frame_time_us))), false),
        (stat(format_args!("Draw:  {:.1}ms", ms(metrics.render_time_us))), false),
        (stat(format_args!("Max:   {:.1}ms", ms(metrics.frame_time_max_us))), true),
        (stat(format_args!("Avg:   {:.1}ms", ms(metrics.frame_time_avg_us()))), true),
        (stat(format_args!("Frames:{}", metrics.total_frames)), false),
    ];
    draw_stat_lines(display, COL1_X, &lines);
}

fn draw_events_column(
    display: &mut SimulatorDisplay<Rgb565>,
    snapshot: &DebugSnapshot<'_>,
) {
    let metrics = snapshot.metrics;
    let rejected = match snapshot.screen.widget(WidgetKind::Battery) {
        Some(StatusWidget::Battery(battery)) => battery.rejected_sources(),
        _ => 0,
    };
    let lines = [
        (stat(format_args!("Events: {}", metrics.events)), false),
        (stat(format_args!("Redraw: {}", metrics.redraws)), false),
        (stat(format_args!("Wakes:  {}", metrics.wakes)), false),
        (stat(format_args!("Notice: {}", snapshot.screen.diagnostics().total())), false),
        (stat(format_args!("Reject: {rejected}")), rejected > 0),
        (stat(format_args!("Drop:   {}", metrics.dropped)), metrics.dropped > 0),
    ];
    draw_stat_lines(display, COL2_X, &lines);
}

fn draw_power_column(
    display: &mut SimulatorDisplay<Rgb565>,
    snapshot: &DebugSnapshot<'_>,
) {
    let power = snapshot.power;
    let on = power.is_on();
    let theme = if snapshot.screen.theme().background == BLACK { "dark" } else { "light" };
    let lines = [
        (stat(format_args!("Screen: {}", if on { "ON" } else { "OFF" })), !on),
        (stat(format_args!("Idle: {}s", power.idle_secs(snapshot.now_ms))), false),
        (stat(format_args!("Limit: {}s", snapshot.idle_timeout_secs)), false),
        (stat(format_args!("Theme: {theme}")), false),
        (stat(format_args!("Script: {}", if snapshot.script_on { "ON" } else { "OFF" })), false),
    ];
    draw_stat_lines(display, COL3_X, &lines);
}

fn draw_log_terminal(
    display: &mut SimulatorDisplay<Rgb565>,
    log: &EventLog,
) {
    let prompt_style = MonoTextStyle::new(SMALL_FONT, LOG_PROMPT_COLOR);
    let text_style = MonoTextStyle::new(SMALL_FONT, LOG_TEXT_COLOR);

    Rectangle::new(
        Point::new(0, LOG_DIVIDER_Y + 2),
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT - LOG_DIVIDER_Y as u32 - 2),
    )
    .into_styled(PrimitiveStyle::with_fill(Rgb565::new(1, 2, 1)))
    .draw(display)
    .ok();

    let mut y = LOG_Y;

    for line in log.iter() {
        row_text(">", COL1_X, y, prompt_style).draw(display).ok();
        row_text(line, COL1_X + 10, y, text_style).draw(display).ok();
        y += LOG_LINE_HEIGHT;
    }

    row_text("> _", COL1_X, y, prompt_style).draw(display).ok();
}

fn draw_horizontal_line(
    display: &mut SimulatorDisplay<Rgb565>,
    y: i32,
) {
    Line::new(Point::new(2, y), Point::new(DISPLAY_WIDTH as i32 - 2, y))
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1))
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use dongle_screen::diagnostics::LOG_BUFFER_SIZE;
    use embedded_graphics::geometry::Dimensions;

    use super::*;

    fn style() -> MonoTextStyle<'static, Rgb565> { MonoTextStyle::new(SMALL_FONT, VALUE_COLOR) }

    #[test]
    fn test_row_text_is_centered_on_y() {
        let bounds = row_text("Frame", COL2_X, STATS_Y, style()).bounding_box();
        assert_eq!(bounds.top_left.x, COL2_X, "text should start at the column");
        let top = bounds.top_left.y;
        let bottom = top + bounds.size.height as i32;
        assert!(top < STATS_Y && STATS_Y < bottom, "middle {STATS_Y} outside {top}..{bottom}");
    }

    #[test]
    fn test_stat_rows_stay_between_dividers() {
        let top = row_text("Frames", COL1_X, STATS_Y, style()).bounding_box();
        assert!(top.top_left.y > SECTION_HEADER_Y, "first stat overlaps the section header");

        let last_y = STATS_Y + 5 * STAT_LINE_HEIGHT;
        let last = row_text("Drop", COL1_X, last_y, style()).bounding_box();
        assert!(last.top_left.y + last.size.height as i32 <= LOG_DIVIDER_Y, "last stat crosses the log divider");
    }

    #[test]
    fn test_log_rows_fit_below_divider() {
        let first = row_text(">", COL1_X, LOG_Y, style()).bounding_box();
        assert!(first.top_left.y > LOG_DIVIDER_Y + 2, "first log line overlaps the divider");

        let prompt_y = LOG_Y + LOG_BUFFER_SIZE as i32 * LOG_LINE_HEIGHT;
        let prompt = row_text("> _", COL1_X, prompt_y, style()).bounding_box();
        assert!(
            prompt.top_left.y + prompt.size.height as i32 <= DISPLAY_HEIGHT as i32,
            "prompt below a full log runs off screen"
        );
    }
}
