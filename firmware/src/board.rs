//! Board wiring and timing for a Pico 2 driving a 1.69" ST7789V panel.
//!
//! Pin mapping:
//! - DC: GPIO16
//! - CS: GPIO17
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - Backlight: GPIO20
//! - Reset: tied to RUN (resets with the Pico)
//! - VBUS sense: GPIO24 (on-board)
//! - VSYS / 3: GPIO29 (ADC3, on-board)

use dongle_screen::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

// =============================================================================
// Panel
// =============================================================================

/// SPI clock for the panel. The ST7789 is rated to 62.5 MHz; 40 MHz leaves margin
/// for flying wires.
pub const SPI_FREQUENCY_HZ: u32 = 40_000_000;

/// Native (portrait) panel width.
pub const PANEL_WIDTH: u16 = 240;

/// Native (portrait) panel height.
pub const PANEL_HEIGHT: u16 = 280;

/// The 240x280 glass sits 20 rows into the controller's 240x320 memory.
pub const PANEL_ROW_OFFSET: u16 = 20;

/// Bytes buffered per SPI transfer by the display interface.
pub const SPI_BUFFER_SIZE: usize = 512;

// Rotated 90 degrees, the panel is the screen's landscape display.
const _: () = assert!(PANEL_HEIGHT as u32 == DISPLAY_WIDTH);
const _: () = assert!(PANEL_WIDTH as u32 == DISPLAY_HEIGHT);

// =============================================================================
// Task Timing
// =============================================================================

/// How often the display task re-checks the idle timeout when no event arrives.
pub const POWER_TICK_MS: u64 = 1_000;

/// VBUS sampling period.
pub const VBUS_POLL_MS: u64 = 50;

/// VBUS must hold a new level this long before it is reported.
pub const VBUS_DEBOUNCE_MS: u64 = 150;

/// VSYS sampling period for the dongle battery.
pub const SUPPLY_POLL_MS: u64 = 60_000;

const _: () = assert!(VBUS_DEBOUNCE_MS > VBUS_POLL_MS);
