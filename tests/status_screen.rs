//! End-to-end tests: events in, pixels out.
//!
//! Draws the full status screen into an in-memory framebuffer and checks the
//! pixels the widgets produce.

use dongle_screen::colors::{BLACK, GREEN, RED, Theme, WHITE, YELLOW};
use dongle_screen::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, DONGLE_SOURCE_OFFSET, METER_WIDTH};
use dongle_screen::events::{ModifierMask, OutputState, StatusEventChannel};
use dongle_screen::layout::{GridSpec, WidgetFeatures, WidgetKind};
use dongle_screen::screen::{DisplayPower, PowerTransition};
use dongle_screen::widgets::StatusWidget;
use dongle_screen::{StatusEvent, StatusScreen};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Framebuffer
// =============================================================================

struct Framebuffer {
    pixels: Vec<Rgb565>,
    /// Color to mark untouched pixels, so tests can tell "never drawn" apart.
    unset: Rgb565,
}

impl Framebuffer {
    fn new() -> Self {
        let unset = Rgb565::new(1, 2, 3);
        Self {
            pixels: vec![unset; (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize],
            unset,
        }
    }

    fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Rgb565 {
        self.pixels[(y as u32 * DISPLAY_WIDTH + x as u32) as usize]
    }

    fn count_in(
        &self,
        area: Rectangle,
        color: Rgb565,
    ) -> usize {
        area.points().filter(|p| self.pixel(p.x, p.y) == color).count()
    }

    fn row(
        &self,
        y: i32,
        xs: core::ops::Range<i32>,
    ) -> Vec<Rgb565> {
        xs.map(|x| self.pixel(x, y)).collect()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT) }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 && (point.x as u32) < DISPLAY_WIDTH && (point.y as u32) < DISPLAY_HEIGHT {
                self.pixels[(point.y as u32 * DISPLAY_WIDTH + point.x as u32) as usize] = color;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn default_screen() -> StatusScreen {
    let grid = GridSpec::new(6, 8, DISPLAY_WIDTH, DISPLAY_HEIGHT).unwrap();
    StatusScreen::new(&grid, WidgetFeatures::ALL, Theme::DARK).unwrap()
}

fn meter_rect(
    screen: &StatusScreen,
    source: usize,
) -> Rectangle {
    match screen.widget(WidgetKind::Battery) {
        Some(StatusWidget::Battery(battery)) => battery.meter_rect(source),
        _ => panic!("battery widget missing"),
    }
}

/// Source index of the first peripheral.
fn first_peripheral() -> u8 { DONGLE_SOURCE_OFFSET as u8 }

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_first_frame_covers_display() {
    let mut screen = default_screen();
    let mut fb = Framebuffer::new();
    assert!(screen.draw(&mut fb));

    let untouched = fb.pixels.iter().filter(|&&c| c == fb.unset).count();
    assert_eq!(untouched, 0, "first frame should clear the whole display");

    // WPM frame in the top-left corner.
    assert_eq!(fb.pixel(0, 0), WHITE);
    assert_eq!(fb.pixel(104, 39), WHITE);
}

#[test]
fn test_battery_meter_pixels() {
    let mut screen = default_screen();
    let mut fb = Framebuffer::new();
    screen.draw(&mut fb);

    let source = first_peripheral();
    assert!(screen.handle_event(&StatusEvent::peripheral_battery(0, 50)), "first report wakes");
    screen.draw(&mut fb);

    let meter = meter_rect(&screen, source as usize);
    let y = meter.top_left.y;
    let x0 = meter.top_left.x;
    let row = fb.row(y, x0..x0 + METER_WIDTH as i32);
    assert!(row[..13].iter().all(|&c| c == GREEN), "50% of 25 px rounds to 13 filled");
    assert!(row[13..].iter().all(|&c| c == BLACK));

    // Shell outline one pixel above the meter.
    assert_eq!(fb.pixel(x0, y - 1), WHITE);
}

#[test]
fn test_battery_tiers_recolor_meter() {
    let mut screen = default_screen();
    let mut fb = Framebuffer::new();
    let source = first_peripheral();

    screen.handle_event(&StatusEvent::peripheral_battery(0, 20));
    screen.draw(&mut fb);
    let meter = meter_rect(&screen, source as usize);
    assert_eq!(fb.count_in(meter, YELLOW), 5 * 4, "20% of 25 px is 5 columns");

    screen.handle_event(&StatusEvent::peripheral_battery(0, 5));
    screen.draw(&mut fb);
    assert_eq!(fb.count_in(meter, RED), 4, "(25 * 5 + 50) / 100 = 1 column");
    assert_eq!(fb.count_in(meter, YELLOW), 0);
}

#[test]
fn test_disconnected_source_has_empty_meter() {
    let mut screen = default_screen();
    let mut fb = Framebuffer::new();
    let source = first_peripheral();

    screen.handle_event(&StatusEvent::peripheral_battery(0, 80));
    screen.draw(&mut fb);
    assert!(!screen.handle_event(&StatusEvent::peripheral_battery(0, 0)));
    screen.draw(&mut fb);

    let meter = meter_rect(&screen, source as usize);
    assert_eq!(fb.count_in(meter, BLACK), meter.points().count());

    // Coming back wakes the screen.
    assert!(screen.handle_event(&StatusEvent::peripheral_battery(0, 80)));
    assert!(screen.diagnostics().iter().any(|line| line.contains("disconnected")));
}

#[test]
fn test_hidden_battery_columns_stay_blank() {
    let mut screen = default_screen();
    let mut fb = Framebuffer::new();
    screen.draw(&mut fb);

    let area = screen.widget(WidgetKind::Battery).unwrap().area();
    assert_eq!(fb.count_in(area, BLACK), area.points().count(), "no column has reported yet");
}

#[test]
fn test_events_through_channel() {
    let channel = StatusEventChannel::new();
    channel.try_send(StatusEvent::Wpm(160)).unwrap();
    channel.try_send(StatusEvent::layer(1, Some("NAV"))).unwrap();
    channel.try_send(StatusEvent::Modifiers(ModifierMask(ModifierMask::LEFT_SHIFT))).unwrap();
    channel.try_send(StatusEvent::Output(OutputState::ble(0, true, true))).unwrap();

    let mut screen = default_screen();
    let mut fb = Framebuffer::new();
    screen.draw(&mut fb);

    while let Ok(event) = channel.try_receive() {
        screen.handle_event(&event);
    }
    assert!(screen.needs_draw());
    screen.draw(&mut fb);
    assert!(!screen.needs_draw());

    // Every text widget now shows something in the foreground color.
    for kind in [WidgetKind::Wpm, WidgetKind::Layer, WidgetKind::Modifiers, WidgetKind::Output] {
        let area = screen.widget(kind).unwrap().area();
        assert!(fb.count_in(area, WHITE) > 0, "{kind:?} drew nothing");
    }
}

#[test]
fn test_modifier_release_clears_text() {
    let mut screen = default_screen();
    let mut fb = Framebuffer::new();
    let area = screen.widget(WidgetKind::Modifiers).unwrap().area();

    screen.handle_event(&StatusEvent::Modifiers(ModifierMask(ModifierMask::RIGHT_ALT)));
    screen.draw(&mut fb);
    assert!(fb.count_in(area, WHITE) > 0);

    screen.handle_event(&StatusEvent::Modifiers(ModifierMask::NONE));
    screen.draw(&mut fb);
    assert_eq!(fb.count_in(area, WHITE), 0);
}

#[test]
fn test_light_theme() {
    let grid = GridSpec::new(6, 8, DISPLAY_WIDTH, DISPLAY_HEIGHT).unwrap();
    let mut screen = StatusScreen::new(&grid, WidgetFeatures::ALL, Theme::LIGHT).unwrap();
    let mut fb = Framebuffer::new();
    screen.draw(&mut fb);
    assert_eq!(fb.pixel(140, 235), WHITE, "background below the bands");
    assert_eq!(fb.pixel(0, 0), BLACK, "WPM frame in the foreground color");
}

#[test]
fn test_reconnect_wakes_display() {
    let mut screen = default_screen();
    let mut power = DisplayPower::new(10, 0);
    assert_eq!(power.tick(12_000), Some(PowerTransition::TurnedOff));

    if screen.handle_event(&StatusEvent::peripheral_battery(1, 66)) {
        assert_eq!(power.activity(12_500), Some(PowerTransition::TurnedOn));
    } else {
        panic!("reconnect should request a wake");
    }
    assert!(power.is_on());
}
