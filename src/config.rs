//! Display, grid and widget configuration constants.
//!
//! Everything the screen needs to know at build time lives here: panel size,
//! grid shape, battery meter geometry and the widget set selected by Cargo
//! features. Layout arithmetic that only depends on these values is computed
//! as `const` so a bad combination fails the build instead of the boot.

use crate::layout::{GridSpec, WidgetFeatures};

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (1.69" ST7789 panel in landscape: 280x240).
pub const DISPLAY_WIDTH: u32 = 280;

/// Display height in pixels.
pub const DISPLAY_HEIGHT: u32 = 240;

// =============================================================================
// Grid Configuration
// =============================================================================

/// Number of grid rows the screen is divided into.
pub const GRID_ROWS: u16 = 6;

/// Number of grid columns the screen is divided into.
pub const GRID_COLUMNS: u16 = 8;

/// Columns reserved for the WPM widget when it shares the top band with output.
pub const WPM_COLUMNS: u16 = 3;

/// Rows occupied by the layer band.
pub const LAYER_ROWS: u16 = 2;

/// Grid used by the status screen.
pub const GRID: GridSpec = GridSpec::new_unchecked(GRID_ROWS, GRID_COLUMNS, DISPLAY_WIDTH, DISPLAY_HEIGHT);

/// Width of one grid cell. Pre-computed so drawing code never divides.
pub const CELL_WIDTH: u32 = DISPLAY_WIDTH / GRID_COLUMNS as u32;

/// Height of one grid cell.
pub const CELL_HEIGHT: u32 = DISPLAY_HEIGHT / GRID_ROWS as u32;

/// Widgets enabled through Cargo features.
pub const FEATURES: WidgetFeatures = WidgetFeatures::from_cargo_features();

const _: () = assert!(GRID_ROWS > 0 && GRID_COLUMNS > 0);
const _: () = assert!(CELL_WIDTH > 0 && CELL_HEIGHT > 0, "Grid cells must be at least one pixel");
const _: () = assert!(
    FEATURES.required_rows(LAYER_ROWS) <= GRID_ROWS,
    "Too many rows, consider reducing widgets"
);
const _: () = assert!(
    !(FEATURES.wpm && FEATURES.output) || WPM_COLUMNS < GRID_COLUMNS,
    "Column count limit"
);

// =============================================================================
// Battery Configuration
// =============================================================================

/// Number of split peripherals reporting battery levels to the dongle.
pub const PERIPHERAL_COUNT: usize = 2;

/// Source index offset: the dongle's own battery takes source 0 when shown.
pub const DONGLE_SOURCE_OFFSET: usize = if cfg!(feature = "dongle-battery") { 1 } else { 0 };

/// Number of battery sources shown in the battery band.
pub const BATTERY_SOURCE_COUNT: usize = PERIPHERAL_COUNT + DONGLE_SOURCE_OFFSET;

/// Inner meter width in pixels (the filled part of the battery glyph).
pub const METER_WIDTH: u32 = 25;

/// Inner meter height in pixels.
pub const METER_HEIGHT: u32 = 4;

/// Height of the level label row above each battery glyph.
pub const BATTERY_LABEL_HEIGHT: u32 = 25;

const _: () = assert!(BATTERY_SOURCE_COUNT > 0 && BATTERY_SOURCE_COUNT <= u8::MAX as usize);

// =============================================================================
// Output / Layer Configuration
// =============================================================================

/// Number of BLE profiles the keyboard exposes.
pub const BLE_PROFILE_COUNT: u8 = 5;

/// Maximum layer label length kept for display.
pub const LAYER_LABEL_LENGTH: usize = 12;

// =============================================================================
// Power / Event Configuration
// =============================================================================

/// Seconds without activity before the screen turns off. 0 keeps it on.
pub const IDLE_TIMEOUT_SECS: u64 = 300;

/// Depth of the status event channel.
pub const EVENT_QUEUE_DEPTH: usize = 8;
