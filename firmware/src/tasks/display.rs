//! Display task: the only consumer of `STATUS_EVENTS`.
//!
//! Events are handled in arrival order, so the screen's reconnect tracking has
//! a single writer. After each batch the dirty widgets are drawn. The idle
//! timeout is checked on every wake-up, and at least every
//! [`POWER_TICK_MS`] when nothing arrives.

use defmt::info;
use dongle_screen::config::IDLE_TIMEOUT_SECS;
use dongle_screen::screen::{DisplayPower, PowerTransition};
use dongle_screen::{STATUS_EVENTS, StatusEvent, StatusScreen};
use dongle_screen_firmware::board::POWER_TICK_MS;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, with_timeout};

use crate::display::PanelDisplay;

#[embassy_executor::task]
pub async fn display_task(
    mut display: PanelDisplay,
    mut screen: StatusScreen,
    mut backlight: Output<'static>,
) {
    info!("Display task started");

    let start = Instant::now();
    let now_ms = || start.elapsed().as_millis();
    let mut power = DisplayPower::new(IDLE_TIMEOUT_SECS, now_ms());

    // First frame before the backlight comes on, so the panel's power-on noise stays hidden.
    screen.draw(&mut display);
    backlight.set_high();

    loop {
        if let Ok(first) = with_timeout(Duration::from_millis(POWER_TICK_MS), STATUS_EVENTS.receive()).await {
            let mut event = Some(first);
            while let Some(current) = event {
                if handle(&mut screen, &current) {
                    apply_power(power.activity(now_ms()), &mut backlight, &mut screen);
                }
                event = STATUS_EVENTS.try_receive().ok();
            }
        }

        apply_power(power.tick(now_ms()), &mut backlight, &mut screen);
        screen.draw(&mut display);
    }
}

/// Route one event. Returns `true` when it counts as activity: a wake request
/// from the screen, or typing.
fn handle(
    screen: &mut StatusScreen,
    event: &StatusEvent,
) -> bool {
    let typing = matches!(event, StatusEvent::Wpm(wpm) if *wpm > 0);
    screen.handle_event(event) || typing
}

fn apply_power(
    transition: Option<PowerTransition>,
    backlight: &mut Output<'static>,
    screen: &mut StatusScreen,
) {
    match transition {
        Some(PowerTransition::TurnedOff) => {
            info!("Backlight off (idle)");
            backlight.set_low();
        }
        Some(PowerTransition::TurnedOn) => {
            info!("Backlight on");
            // Widgets kept updating while dark; repaint before lighting up.
            screen.invalidate();
            backlight.set_high();
        }
        None => {}
    }
}
