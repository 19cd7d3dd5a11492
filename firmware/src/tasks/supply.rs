//! Dongle battery task: samples VSYS and reports it as battery source 0.

use defmt::{info, warn};
use dongle_screen::{STATUS_EVENTS, StatusEvent};
use dongle_screen_firmware::board::SUPPLY_POLL_MS;
use dongle_screen_firmware::supply::{percent_from_millivolts, vsys_millivolts};
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::Timer;

#[embassy_executor::task]
pub async fn supply_task(
    mut adc: Adc<'static, Async>,
    mut vsys: Channel<'static>,
) {
    info!("Supply task started");

    loop {
        match adc.read(&mut vsys).await {
            Ok(raw) => {
                let mv = vsys_millivolts(raw);
                let percent = percent_from_millivolts(mv);
                info!("VSYS {} mV ({}%)", mv, percent);
                if let Some(event) = StatusEvent::central_battery(percent) {
                    STATUS_EVENTS.send(event).await;
                }
            }
            Err(e) => warn!("VSYS read failed: {}", e),
        }
        Timer::after_millis(SUPPLY_POLL_MS).await;
    }
}
