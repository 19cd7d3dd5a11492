//! Band allocation for the enabled widgets.
//!
//! Bands are stacked top to bottom in a fixed order:
//!
//! | Band | Widgets | Rows | Columns |
//! |------|---------|------|---------|
//! | 1 | WPM + Output | 1 | WPM: `WPM_COLUMNS`, Output: the rest |
//! | 2 | Layer | `LAYER_ROWS` | full width |
//! | 3 | Modifiers | 1 | full width |
//! | 4 | Battery | 1 | full width |
//!
//! Disabled widgets take no rows, so the bands below move up.

use heapless::Vec;

use super::{GridSpec, LayoutOverflow, WidgetKind};
use crate::config::{LAYER_ROWS, WPM_COLUMNS};

/// Which widgets are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetFeatures {
    pub wpm: bool,
    pub output: bool,
    pub layer: bool,
    pub modifiers: bool,
    pub battery: bool,
}

impl WidgetFeatures {
    /// Every widget enabled.
    pub const ALL: Self = Self {
        wpm: true,
        output: true,
        layer: true,
        modifiers: true,
        battery: true,
    };

    /// No widget enabled.
    pub const NONE: Self = Self {
        wpm: false,
        output: false,
        layer: false,
        modifiers: false,
        battery: false,
    };

    /// Widget set selected by the crate's Cargo features.
    pub const fn from_cargo_features() -> Self {
        Self {
            wpm: cfg!(feature = "wpm"),
            output: cfg!(feature = "output"),
            layer: cfg!(feature = "layer"),
            modifiers: cfg!(feature = "modifiers"),
            battery: cfg!(feature = "battery"),
        }
    }

    /// Whether the widget of `kind` gets a band.
    pub const fn is_enabled(
        &self,
        kind: WidgetKind,
    ) -> bool {
        match kind {
            WidgetKind::Wpm => self.wpm,
            WidgetKind::Output => self.output,
            WidgetKind::Layer => self.layer,
            WidgetKind::Modifiers => self.modifiers,
            WidgetKind::Battery => self.battery,
        }
    }

    /// Total rows the enabled bands need.
    pub const fn required_rows(
        &self,
        layer_rows: u16,
    ) -> u16 {
        let mut rows = 0;
        if self.is_enabled(WidgetKind::Wpm) || self.is_enabled(WidgetKind::Output) {
            rows += 1;
        }
        if self.is_enabled(WidgetKind::Layer) {
            rows += layer_rows;
        }
        if self.is_enabled(WidgetKind::Modifiers) {
            rows += 1;
        }
        if self.is_enabled(WidgetKind::Battery) {
            rows += 1;
        }
        rows
    }
}

/// Grid placement of one widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetLayout {
    pub column: u16,
    pub row: u16,
    pub column_span: u16,
    pub row_span: u16,
    pub active: bool,
}

impl WidgetLayout {
    /// Placement of a disabled widget: no cells at all.
    pub const INACTIVE: Self = Self {
        column: 0,
        row: 0,
        column_span: 0,
        row_span: 0,
        active: false,
    };

    const fn band(
        column: u16,
        row: u16,
        column_span: u16,
        row_span: u16,
    ) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
            active: true,
        }
    }

    /// First row below this widget.
    #[inline]
    pub const fn end_row(&self) -> u16 { self.row + self.row_span }

    /// First column right of this widget.
    #[inline]
    pub const fn end_column(&self) -> u16 { self.column + self.column_span }
}

/// Ordered layouts of the enabled widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetLayouts {
    entries: Vec<(WidgetKind, WidgetLayout), { WidgetKind::COUNT }>,
}

impl WidgetLayouts {
    /// Layouts in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetKind, WidgetLayout)> + '_ { self.entries.iter().copied() }

    /// Layout for a kind, or [`WidgetLayout::INACTIVE`] when it is disabled.
    pub fn get(
        &self,
        kind: WidgetKind,
    ) -> WidgetLayout {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(WidgetLayout::INACTIVE, |(_, layout)| *layout)
    }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Rows used by all bands.
    pub fn rows_used(&self) -> u16 { self.entries.iter().map(|(_, l)| l.end_row()).max().unwrap_or(0) }
}

/// Allocate a band for every enabled widget.
///
/// Fails with [`LayoutOverflow`] when the bands need more rows or columns
/// than `grid` has, or when its cells would be empty.
pub fn build_layouts(
    grid: &GridSpec,
    features: WidgetFeatures,
) -> Result<WidgetLayouts, LayoutOverflow> {
    if grid.cell_width() == 0 || grid.cell_height() == 0 {
        return Err(LayoutOverflow::EmptyCell {
            cell_width: grid.cell_width(),
            cell_height: grid.cell_height(),
        });
    }

    let required = features.required_rows(LAYER_ROWS);
    if required > grid.rows() {
        return Err(LayoutOverflow::Rows {
            required,
            available: grid.rows(),
        });
    }

    let columns = grid.columns();
    let mut entries = Vec::new();
    let mut row = 0;

    let wpm = features.is_enabled(WidgetKind::Wpm);
    let output = features.is_enabled(WidgetKind::Output);
    if wpm || output {
        let mut next_column = 0;
        if wpm {
            if WPM_COLUMNS > columns {
                return Err(LayoutOverflow::Columns {
                    kind: Some(WidgetKind::Wpm),
                    required: WPM_COLUMNS,
                    available: columns,
                });
            }
            push(&mut entries, WidgetKind::Wpm, WidgetLayout::band(0, row, WPM_COLUMNS, 1));
            next_column = WPM_COLUMNS;
        }
        if output {
            if next_column >= columns {
                return Err(LayoutOverflow::Columns {
                    kind: Some(WidgetKind::Output),
                    required: next_column + 1,
                    available: columns,
                });
            }
            let span = columns - next_column;
            push(&mut entries, WidgetKind::Output, WidgetLayout::band(next_column, row, span, 1));
        }
        row += 1;
    }

    if features.is_enabled(WidgetKind::Layer) {
        push(&mut entries, WidgetKind::Layer, WidgetLayout::band(0, row, columns, LAYER_ROWS));
        row += LAYER_ROWS;
    }

    if features.is_enabled(WidgetKind::Modifiers) {
        push(&mut entries, WidgetKind::Modifiers, WidgetLayout::band(0, row, columns, 1));
        row += 1;
    }

    if features.is_enabled(WidgetKind::Battery) {
        push(&mut entries, WidgetKind::Battery, WidgetLayout::band(0, row, columns, 1));
    }

    Ok(WidgetLayouts { entries })
}

fn push(
    entries: &mut Vec<(WidgetKind, WidgetLayout), { WidgetKind::COUNT }>,
    kind: WidgetKind,
    layout: WidgetLayout,
) {
    // One entry per kind, so capacity can't run out.
    let _ = entries.push((kind, layout));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(
        rows: u16,
        columns: u16,
    ) -> GridSpec {
        GridSpec::new(rows, columns, 280, 240).unwrap()
    }

    #[test]
    fn test_all_widgets_fit_six_rows() {
        let layouts = build_layouts(&grid(6, 8), WidgetFeatures::ALL).unwrap();
        assert_eq!(layouts.len(), 5);

        let kinds: std::vec::Vec<_> = layouts.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, WidgetKind::ALL);

        assert_eq!(layouts.get(WidgetKind::Wpm), WidgetLayout::band(0, 0, 3, 1));
        assert_eq!(layouts.get(WidgetKind::Output), WidgetLayout::band(3, 0, 5, 1));
        assert_eq!(layouts.get(WidgetKind::Layer), WidgetLayout::band(0, 1, 8, 2));
        assert_eq!(layouts.get(WidgetKind::Modifiers), WidgetLayout::band(0, 3, 8, 1));
        assert_eq!(layouts.get(WidgetKind::Battery), WidgetLayout::band(0, 4, 8, 1));
        assert_eq!(layouts.rows_used(), 5);
    }

    #[test]
    fn test_bands_do_not_overlap() {
        let layouts = build_layouts(&grid(6, 8), WidgetFeatures::ALL).unwrap();
        let mut previous_end = 0;
        for (kind, layout) in layouts.iter() {
            if kind == WidgetKind::Output {
                // Shares the first band with WPM, to its right.
                let wpm = layouts.get(WidgetKind::Wpm);
                assert_eq!(layout.row, wpm.row);
                assert!(layout.column >= wpm.end_column());
                continue;
            }
            assert!(layout.row >= previous_end, "{kind:?} overlaps the band above");
            previous_end = layout.end_row();
        }
    }

    #[test]
    fn test_row_overflow() {
        let result = build_layouts(&grid(4, 8), WidgetFeatures::ALL);
        assert_eq!(result, Err(LayoutOverflow::Rows { required: 5, available: 4 }));
    }

    #[test]
    fn test_disabled_widgets_release_rows() {
        let features = WidgetFeatures {
            wpm: false,
            output: false,
            ..WidgetFeatures::ALL
        };
        let layouts = build_layouts(&grid(4, 8), features).unwrap();
        assert_eq!(layouts.len(), 3);
        assert_eq!(layouts.get(WidgetKind::Layer).row, 0);
        assert_eq!(layouts.get(WidgetKind::Battery).row, 3);
        assert_eq!(layouts.get(WidgetKind::Wpm), WidgetLayout::INACTIVE);
        assert!(!layouts.get(WidgetKind::Output).active);
    }

    #[test]
    fn test_output_takes_full_width_without_wpm() {
        let features = WidgetFeatures {
            wpm: false,
            ..WidgetFeatures::ALL
        };
        let layouts = build_layouts(&grid(6, 8), features).unwrap();
        assert_eq!(layouts.get(WidgetKind::Output), WidgetLayout::band(0, 0, 8, 1));
    }

    #[test]
    fn test_wpm_alone_keeps_fixed_width() {
        let features = WidgetFeatures {
            wpm: true,
            ..WidgetFeatures::NONE
        };
        let layouts = build_layouts(&grid(6, 8), features).unwrap();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts.get(WidgetKind::Wpm).column_span, 3);
    }

    #[test]
    fn test_column_overflow() {
        let result = build_layouts(&grid(6, 3), WidgetFeatures::ALL);
        assert_eq!(
            result,
            Err(LayoutOverflow::Columns {
                kind: Some(WidgetKind::Output),
                required: 4,
                available: 3,
            })
        );

        let result = build_layouts(&grid(6, 2), WidgetFeatures::ALL);
        assert!(matches!(
            result,
            Err(LayoutOverflow::Columns { kind: Some(WidgetKind::Wpm), .. })
        ));
    }

    #[test]
    fn test_empty_cells_rejected() {
        let tiny = GridSpec::new(6, 8, 7, 240).unwrap();
        assert_eq!(
            build_layouts(&tiny, WidgetFeatures::ALL),
            Err(LayoutOverflow::EmptyCell { cell_width: 0, cell_height: 40 })
        );
    }

    #[test]
    fn test_no_widgets() {
        let layouts = build_layouts(&grid(6, 8), WidgetFeatures::NONE).unwrap();
        assert!(layouts.is_empty());
        assert_eq!(layouts.rows_used(), 0);
    }

    #[test]
    fn test_spans_stay_inside_grid() {
        let g = grid(6, 8);
        let layouts = build_layouts(&g, WidgetFeatures::ALL).unwrap();
        for (_, layout) in layouts.iter() {
            assert!(layout.end_column() <= g.columns());
            assert!(layout.end_row() <= g.rows());
        }
    }

    #[test]
    fn test_is_enabled_matches_fields() {
        let features = WidgetFeatures {
            output: true,
            battery: true,
            ..WidgetFeatures::NONE
        };
        assert!(features.is_enabled(WidgetKind::Output));
        assert!(features.is_enabled(WidgetKind::Battery));
        assert!(!features.is_enabled(WidgetKind::Wpm));
        assert!(!features.is_enabled(WidgetKind::Layer));
        assert!(!features.is_enabled(WidgetKind::Modifiers));
        assert!(WidgetKind::ALL.iter().all(|&kind| WidgetFeatures::ALL.is_enabled(kind)));
    }

    #[test]
    fn test_layouts_cover_exactly_enabled_kinds() {
        for mask in 0u8..32 {
            let features = WidgetFeatures {
                wpm: mask & 1 != 0,
                output: mask & 2 != 0,
                layer: mask & 4 != 0,
                modifiers: mask & 8 != 0,
                battery: mask & 16 != 0,
            };
            let layouts = build_layouts(&grid(6, 8), features).unwrap();
            for kind in WidgetKind::ALL {
                assert_eq!(
                    layouts.get(kind).active,
                    features.is_enabled(kind),
                    "mask {mask:05b}: {kind:?} placement disagrees with is_enabled"
                );
            }
            assert_eq!(layouts.len(), mask.count_ones() as usize, "mask {mask:05b}");
        }
    }

    #[test]
    fn test_required_rows() {
        assert_eq!(WidgetFeatures::ALL.required_rows(2), 5);
        assert_eq!(WidgetFeatures::NONE.required_rows(2), 0);
        let only_output = WidgetFeatures {
            output: true,
            ..WidgetFeatures::NONE
        };
        assert_eq!(only_output.required_rows(2), 1);
    }
}
