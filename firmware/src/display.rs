//! ST7789V panel setup through `mipidsi`.

use dongle_screen_firmware::board::{PANEL_HEIGHT, PANEL_ROW_OFFSET, PANEL_WIDTH, SPI_BUFFER_SIZE, SPI_FREQUENCY_HZ};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::{Builder, NoResetPin};
use static_cell::StaticCell;

/// The status screen's panel (no reset pin).
pub type PanelDisplay = mipidsi::Display<
    SpiInterface<'static, ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>, Output<'static>>,
    ST7789,
    NoResetPin,
>;

/// Panel bring-up failed.
#[derive(Clone, Copy, Debug, defmt::Format)]
pub enum DisplayError {
    /// The SPI buffer was already handed out.
    Buffer,
    /// The controller rejected the init sequence.
    Init,
}

static SPI_BUFFER: StaticCell<[u8; SPI_BUFFER_SIZE]> = StaticCell::new();

/// SPI configuration for the ST7789.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = SPI_FREQUENCY_HZ;
    config
}

/// Initialize the panel in landscape.
pub fn init_display(
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
) -> Result<PanelDisplay, DisplayError> {
    let buffer = SPI_BUFFER.try_init([0; SPI_BUFFER_SIZE]).ok_or(DisplayError::Buffer)?;

    // GPIO chip select can't fail.
    let Ok(spi_device) = ExclusiveDevice::new_no_delay(spi, cs);
    let di = SpiInterface::new(spi_device, dc, buffer);

    // Native panel is 240x280 (portrait), rotated 90 degrees for 280x240
    Builder::new(ST7789, di)
        .display_size(PANEL_WIDTH, PANEL_HEIGHT)
        .display_offset(0, PANEL_ROW_OFFSET)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut embassy_time::Delay)
        .map_err(|_| DisplayError::Init)
}
