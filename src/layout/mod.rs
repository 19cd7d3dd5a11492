//! Screen layout: grid partitioning and the per-widget layout table.
//!
//! - `grid`: [`GridSpec`] and cell-to-pixel conversion
//! - `table`: band allocation for each enabled widget kind

mod grid;
mod table;

pub use grid::GridSpec;
pub use table::{WidgetFeatures, WidgetLayout, WidgetLayouts, build_layouts};

/// Kinds of widget the status screen can show, in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetKind {
    Wpm,
    Output,
    Layer,
    Modifiers,
    Battery,
}

impl WidgetKind {
    /// Number of widget kinds.
    pub const COUNT: usize = 5;

    /// All kinds in placement order.
    pub const ALL: [Self; Self::COUNT] = [Self::Wpm, Self::Output, Self::Layer, Self::Modifiers, Self::Battery];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Wpm => "wpm",
            Self::Output => "output",
            Self::Layer => "layer",
            Self::Modifiers => "modifiers",
            Self::Battery => "battery",
        }
    }
}

/// Layout does not fit the grid. Fatal at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutOverflow {
    /// Stacked bands need more rows than the grid has.
    Rows { required: u16, available: u16 },
    /// A band needs more columns than the grid has.
    Columns {
        kind: Option<WidgetKind>,
        required: u16,
        available: u16,
    },
    /// Cells would be smaller than one pixel.
    EmptyCell { cell_width: u32, cell_height: u32 },
}
