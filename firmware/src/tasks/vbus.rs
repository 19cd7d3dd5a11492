//! VBUS sense task: USB power presence for the battery widget.

use defmt::info;
use dongle_screen::{STATUS_EVENTS, StatusEvent};
use dongle_screen_firmware::board::VBUS_POLL_MS;
use dongle_screen_firmware::supply::VbusDebounce;
use embassy_rp::gpio::Input;
use embassy_time::{Instant, Timer};

#[embassy_executor::task]
pub async fn vbus_task(vbus: Input<'static>) {
    info!("VBUS task started");

    let start = Instant::now();
    let mut debounce = VbusDebounce::new();

    loop {
        if let Some(present) = debounce.update(vbus.is_high(), start.elapsed().as_millis()) {
            info!("USB power: {}", present);
            STATUS_EVENTS.send(StatusEvent::UsbPower { present }).await;
        }
        Timer::after_millis(VBUS_POLL_MS).await;
    }
}
