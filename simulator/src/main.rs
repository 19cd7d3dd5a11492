//! Dongle status screen simulator for desktop.
//!
//! Runs the status screen in an SDL window through
//! `embedded-graphics-simulator`. Events come from a scripted demo and from
//! key presses (bindings in [`input`]), and pass through the same
//! `STATUS_EVENTS` channel the firmware uses.
//!
//! | Key | Action |
//! |-----|--------|
//! | Y | toggle status / debug page |
//! | S | pause / resume the scripted demo |
//! | T | toggle dark / light theme |
//! | Z | simulate host suspend (screen forced off) |

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod input;
mod metrics;
mod scenario;
mod screens;
mod timing;

use std::thread;
use std::time::Instant;

use dongle_screen::colors::{BLACK, Theme};
use dongle_screen::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use dongle_screen::screen::{DisplayPower, PowerTransition};
use dongle_screen::{STATUS_EVENTS, StatusEvent, StatusScreen};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::input::KeyboardState;
use crate::metrics::SimMetrics;
use crate::scenario::Scenario;
use crate::screens::{DebugSnapshot, draw_debug_page};
use crate::timing::{FRAME_TIME, SIM_IDLE_TIMEOUT_SECS};

/// Frames between debug page refreshes.
const DEBUG_REFRESH_FRAMES: u64 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Page {
    #[default]
    Status,
    Debug,
}

impl Page {
    const fn toggle(self) -> Self {
        match self {
            Self::Status => Self::Debug,
            Self::Debug => Self::Status,
        }
    }
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Dongle Screen Sim", &output_settings);

    let mut screen = match StatusScreen::from_config() {
        Ok(screen) => screen,
        Err(e) => {
            eprintln!("status screen layout failed: {e}");
            return;
        }
    };

    let mut metrics = SimMetrics::new();
    let mut power = DisplayPower::new(SIM_IDLE_TIMEOUT_SECS, metrics.now_ms());
    let mut keyboard = KeyboardState::new();
    let mut scenario = Scenario::new();

    // UI state
    let mut script_on = true;
    let mut host_suspended = false;
    let mut page = Page::default();
    let mut page_just_switched = false;
    let mut last_fps_calc = Instant::now();
    let mut fps_frame_count = 0u32;
    let mut current_fps = 0.0f32;

    loop {
        let frame_start = Instant::now();
        let now_ms = metrics.now_ms();

        // Handle window events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    // Any key counts as typing on the keyboard.
                    apply_power(power.activity(now_ms), &mut screen, &mut display);

                    match keycode {
                        Keycode::Y => {
                            page = page.toggle();
                            page_just_switched = true;
                        }
                        Keycode::S => script_on = !script_on,
                        Keycode::T => {
                            let theme = if screen.theme().background == BLACK { Theme::LIGHT } else { Theme::DARK };
                            screen.set_theme(theme);
                        }
                        Keycode::Z => {
                            host_suspended = !host_suspended;
                            apply_power(power.set_base_on(!host_suspended, now_ms), &mut screen, &mut display);
                        }
                        other => {
                            if let Some(event) = keyboard.on_key(other) {
                                send(event, &mut metrics);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        if script_on {
            for event in scenario.advance() {
                send(event, &mut metrics);
            }
        }

        // Drain the channel the way the firmware's display task does
        while let Ok(event) = STATUS_EVENTS.try_receive() {
            metrics.events += 1;
            let typing = matches!(event, StatusEvent::Wpm(wpm) if wpm > 0);
            let wake = screen.handle_event(&event);
            if wake {
                metrics.wakes += 1;
            }
            if wake || typing {
                apply_power(power.activity(now_ms), &mut screen, &mut display);
            }
        }
        apply_power(power.tick(now_ms), &mut screen, &mut display);

        // FPS calculation
        fps_frame_count += 1;
        if last_fps_calc.elapsed().as_secs() >= 1 {
            current_fps = fps_frame_count as f32 / last_fps_calc.elapsed().as_secs_f32();
            fps_frame_count = 0;
            last_fps_calc = Instant::now();
        }

        let render_start = Instant::now();
        match page {
            Page::Status => {
                if page_just_switched {
                    screen.invalidate();
                }
                if power.is_on() && screen.draw(&mut display) {
                    metrics.redraws += 1;
                }
            }
            Page::Debug => {
                if page_just_switched || metrics.total_frames.is_multiple_of(DEBUG_REFRESH_FRAMES) {
                    let snapshot = DebugSnapshot {
                        metrics: &metrics,
                        screen: &screen,
                        power: &power,
                        now_ms,
                        idle_timeout_secs: SIM_IDLE_TIMEOUT_SECS,
                        script_on,
                        fps: current_fps,
                    };
                    draw_debug_page(&mut display, &snapshot);
                }
            }
        }
        page_just_switched = false;
        let render_time = render_start.elapsed();

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
        metrics.record_frame(frame_start.elapsed(), render_time);
    }
}

/// Queue an event for the screen, counting it when the channel is full.
fn send(
    event: StatusEvent,
    metrics: &mut SimMetrics,
) {
    if STATUS_EVENTS.try_send(event).is_err() {
        metrics.dropped += 1;
    }
}

/// Blank the window when the screen turns off, redraw everything when it
/// comes back.
fn apply_power(
    transition: Option<PowerTransition>,
    screen: &mut StatusScreen,
    display: &mut SimulatorDisplay<Rgb565>,
) {
    match transition {
        Some(PowerTransition::TurnedOff) => {
            display.clear(BLACK).ok();
        }
        Some(PowerTransition::TurnedOn) => screen.invalidate(),
        None => {}
    }
}
