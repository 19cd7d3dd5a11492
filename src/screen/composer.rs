//! Widget placement.
//!
//! Resolves every enabled widget's band through the layout table and turns it
//! into a pixel rectangle. Run once when the screen is built.

use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::layout::{GridSpec, LayoutOverflow, WidgetFeatures, WidgetKind, build_layouts};

/// Pixel area assigned to a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub kind: WidgetKind,
    pub area: Rectangle,
}

/// Placements in layout order.
pub type Placements = Vec<Placement, { WidgetKind::COUNT }>;

/// Place every widget enabled in `features` on `grid`.
///
/// Pure: calling it twice with the same input gives the same placements.
pub fn compose(
    grid: &GridSpec,
    features: WidgetFeatures,
) -> Result<Placements, LayoutOverflow> {
    let layouts = build_layouts(grid, features)?;
    let mut placements = Vec::new();
    for (kind, layout) in layouts.iter() {
        let area = grid.cell(layout.column, layout.row, layout.column_span, layout.row_span);
        // At most one layout per kind.
        let _ = placements.push(Placement { kind, area });
    }
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::{Point, Size};

    #[test]
    fn test_compose_default_grid() {
        let grid = GridSpec::new(6, 8, 280, 240).unwrap();
        let placements = compose(&grid, WidgetFeatures::ALL).unwrap();
        assert_eq!(placements.len(), 5);

        let wpm = placements[0];
        assert_eq!(wpm.kind, WidgetKind::Wpm);
        assert_eq!(wpm.area, Rectangle::new(Point::new(0, 0), Size::new(105, 40)));

        let output = placements[1];
        assert_eq!(output.area, Rectangle::new(Point::new(105, 0), Size::new(175, 40)));

        let layer = placements[2];
        assert_eq!(layer.area, Rectangle::new(Point::new(0, 40), Size::new(280, 80)));

        let battery = placements[4];
        assert_eq!(battery.kind, WidgetKind::Battery);
        assert_eq!(battery.area, Rectangle::new(Point::new(0, 160), Size::new(280, 40)));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let grid = GridSpec::new(6, 8, 280, 240).unwrap();
        assert_eq!(compose(&grid, WidgetFeatures::ALL), compose(&grid, WidgetFeatures::ALL));
    }

    #[test]
    fn test_overflow_propagates() {
        let grid = GridSpec::new(3, 8, 280, 240).unwrap();
        assert_eq!(
            compose(&grid, WidgetFeatures::ALL),
            Err(LayoutOverflow::Rows { required: 5, available: 3 })
        );
    }

    #[test]
    fn test_placements_do_not_overlap() {
        let grid = GridSpec::new(6, 8, 280, 240).unwrap();
        let placements = compose(&grid, WidgetFeatures::ALL).unwrap();
        for (i, a) in placements.iter().enumerate() {
            for b in placements.iter().skip(i + 1) {
                let overlap = a.area.intersection(&b.area);
                assert_eq!(overlap.size, Size::zero(), "{:?} overlaps {:?}", a.kind, b.kind);
            }
        }
    }
}
