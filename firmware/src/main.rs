//! Dongle Status Screen Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows the keyboard's status (WPM, output, layer, modifiers, battery) on a
//! 280x240 ST7789V panel. Keyboard-side code pushes `StatusEvent`s into
//! `dongle_screen::STATUS_EVENTS`; the display task draws them.

#![no_std]
#![no_main]

mod display;
mod tasks;

use defmt::{error, info};
use dongle_screen::StatusScreen;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use {defmt_rtt as _, panic_probe as _};

use crate::display::{display_spi_config, init_display};
use crate::tasks::{display_task, vbus_task};

#[cfg(feature = "dongle-battery")]
embassy_rp::bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
});

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"dongle-screen"),
    embassy_rp::binary_info::rp_program_description!(c"Split keyboard dongle status screen on ST7789"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dongle screen starting...");

    let p = embassy_rp::init(Default::default());

    // Display pins: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let backlight = Output::new(p.PIN_20, Level::Low); // Lit after the first frame

    // TX-only SPI, the panel has no MISO
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());

    let display = match init_display(spi, cs, dc) {
        Ok(display) => display,
        Err(e) => {
            error!("Display init failed: {}", e);
            return;
        }
    };
    info!("Display initialized!");

    // Layout errors are a build configuration mistake; nothing to show without a layout.
    let screen = match StatusScreen::from_config() {
        Ok(screen) => screen,
        Err(e) => {
            error!("Status screen layout failed: {}", e);
            return;
        }
    };

    match display_task(display, screen, backlight) {
        Ok(token) => spawner.spawn(token),
        Err(_) => error!("Display task spawn failed"),
    }

    let vbus = Input::new(p.PIN_24, Pull::None);
    match vbus_task(vbus) {
        Ok(token) => spawner.spawn(token),
        Err(_) => error!("VBUS task spawn failed"),
    }

    #[cfg(feature = "dongle-battery")]
    {
        use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};

        let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
        let vsys = Channel::new_pin(p.PIN_29, Pull::None);
        match tasks::supply_task(adc, vsys) {
            Ok(token) => spawner.spawn(token),
            Err(_) => error!("Supply task spawn failed"),
        }
    }

    info!("Tasks spawned");
}
