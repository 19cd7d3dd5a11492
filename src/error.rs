//! Unified error type for the status screen.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` under the `defmt` feature for on-target logging.

use crate::layout::LayoutOverflow;

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Configuration
    /// Widget layout does not fit the grid. Fatal at startup.
    Layout(LayoutOverflow),

    // Events
    /// Battery event for a source the screen has no column for.
    InvalidSource(InvalidSource),

    /// Battery level outside 0..=100. Drawn as "X", never fatal.
    OutOfRangeLevel(u8),
}

/// Source index outside `0..source_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidSource {
    pub source: u8,
    pub source_count: u8,
}

// Convenience conversions

impl From<LayoutOverflow> for Error {
    fn from(e: LayoutOverflow) -> Self { Error::Layout(e) }
}

impl From<InvalidSource> for Error {
    fn from(e: InvalidSource) -> Self { Error::InvalidSource(e) }
}

impl core::fmt::Display for Error {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Error::Layout(LayoutOverflow::Rows { required, available }) => {
                write!(f, "too many rows: {required} > {available}")
            }
            Error::Layout(LayoutOverflow::Columns { required, available, .. }) => {
                write!(f, "column count limit: {required} > {available}")
            }
            Error::Layout(LayoutOverflow::EmptyCell { cell_width, cell_height }) => {
                write!(f, "empty cell {cell_width}x{cell_height}")
            }
            Error::InvalidSource(e) => write!(f, "bad source {} of {}", e.source, e.source_count),
            Error::OutOfRangeLevel(level) => write!(f, "bad level {level}"),
        }
    }
}
