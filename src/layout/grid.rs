//! Fixed row/column grid over the display.
//!
//! Cells are sized with truncating integer division; the remainder of
//! `width % columns` (and `height % rows`) is left unused at the right and
//! bottom edges rather than spread across cells.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use super::LayoutOverflow;

/// Shape of the status screen grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    rows: u16,
    columns: u16,
    width: u32,
    height: u32,
}

impl GridSpec {
    /// Create a grid, rejecting empty row or column counts.
    pub const fn new(
        rows: u16,
        columns: u16,
        width: u32,
        height: u32,
    ) -> Result<Self, LayoutOverflow> {
        if rows == 0 {
            return Err(LayoutOverflow::Rows { required: 1, available: 0 });
        }
        if columns == 0 {
            return Err(LayoutOverflow::Columns { kind: None, required: 1, available: 0 });
        }
        Ok(Self::new_unchecked(rows, columns, width, height))
    }

    /// Create a grid without validation. Used for `const` configuration that
    /// is asserted separately.
    pub const fn new_unchecked(
        rows: u16,
        columns: u16,
        width: u32,
        height: u32,
    ) -> Self {
        Self { rows, columns, width, height }
    }

    #[inline]
    pub const fn rows(&self) -> u16 { self.rows }

    #[inline]
    pub const fn columns(&self) -> u16 { self.columns }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.height }

    /// Width of a single cell in pixels.
    #[inline]
    pub const fn cell_width(&self) -> u32 { self.width / self.columns as u32 }

    /// Height of a single cell in pixels.
    #[inline]
    pub const fn cell_height(&self) -> u32 { self.height / self.rows as u32 }

    /// Pixel rectangle covered by a span of cells.
    ///
    /// Spans are not validated here; the layout table rejects spans that leave
    /// the grid before any cell is computed.
    pub const fn cell(
        &self,
        column: u16,
        row: u16,
        column_span: u16,
        row_span: u16,
    ) -> Rectangle {
        let cell_w = self.cell_width();
        let cell_h = self.cell_height();
        Rectangle::new(
            Point::new((column as u32 * cell_w) as i32, (row as u32 * cell_h) as i32),
            Size::new(column_span as u32 * cell_w, row_span as u32 * cell_h),
        )
    }

    /// Whole display area.
    pub const fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_truncates() {
        let grid = GridSpec::new(6, 8, 283, 245).unwrap();
        assert_eq!(grid.cell_width(), 35, "283 / 8 drops the 3 px remainder");
        assert_eq!(grid.cell_height(), 40, "245 / 6 drops the 5 px remainder");
    }

    #[test]
    fn test_cell_offsets_and_spans() {
        let grid = GridSpec::new(6, 8, 280, 240).unwrap();
        let rect = grid.cell(3, 0, 5, 1);
        assert_eq!(rect.top_left, Point::new(105, 0));
        assert_eq!(rect.size, Size::new(175, 40));

        let rect = grid.cell(0, 1, 8, 2);
        assert_eq!(rect.top_left, Point::new(0, 40));
        assert_eq!(rect.size, Size::new(280, 80));
    }

    #[test]
    fn test_zero_rows_or_columns_rejected() {
        assert!(matches!(GridSpec::new(0, 8, 280, 240), Err(LayoutOverflow::Rows { .. })));
        assert!(matches!(GridSpec::new(6, 0, 280, 240), Err(LayoutOverflow::Columns { .. })));
    }

    #[test]
    fn test_more_columns_than_pixels_gives_empty_cells() {
        // Not an error for the partitioner; the layout table catches it.
        let grid = GridSpec::new(2, 10, 8, 8).unwrap();
        assert_eq!(grid.cell_width(), 0);
        assert_eq!(grid.cell(1, 0, 1, 1).size, Size::new(0, 4));
    }

    #[test]
    fn test_every_valid_span_stays_inside_display() {
        for (rows, columns, width, height) in [(6u16, 8u16, 280u32, 240u32), (5, 3, 128, 64), (7, 9, 100, 99)] {
            let grid = GridSpec::new(rows, columns, width, height).unwrap();
            let display = grid.bounds();
            for row in 0..rows {
                for column in 0..columns {
                    for row_span in 1..=rows - row {
                        for column_span in 1..=columns - column {
                            let rect = grid.cell(column, row, column_span, row_span);
                            assert!(display.contains(rect.top_left));
                            let bottom_right = rect.bottom_right().unwrap();
                            assert!(
                                display.contains(bottom_right),
                                "{rect:?} escapes {display:?}"
                            );
                        }
                    }
                }
            }
        }
    }
}
