//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! Styles whose color comes from the theme can't be `const`; for those the
//! font references are exposed so callers build `MonoTextStyle::new(font, color)`
//! with only the color varying.
//!
//! # Font Selection
//!
//! Widgets pick their font from the height of the cell they were placed in
//! ([`font_for_height`]), so a grid with more rows shrinks the text instead of
//! clipping it.

use embedded_graphics::{
    mono_font::{MonoFont, ascii::FONT_6X10},
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder},
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_12_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered text, vertically middle. Used for cell values.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Left-aligned text, vertically middle. Used for the diagnostics page.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Middle)
    .build();

/// Right-aligned text, vertically middle. Used for the output status.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10 pixels).
pub const SMALL_FONT: &MonoFont = &FONT_6X10;

/// Medium font (`ProFont` 12pt).
pub const MEDIUM_FONT: &MonoFont = &PROFONT_12_POINT;

/// Large font (`ProFont` 18pt).
pub const LARGE_FONT: &MonoFont = &PROFONT_18_POINT;

/// Extra large font (`ProFont` 24pt). Used for the layer name on tall bands.
pub const HUGE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Below this cell height the small font is used.
pub const SMALL_CELL_HEIGHT: u32 = 20;

/// Below this cell height (and at or above [`SMALL_CELL_HEIGHT`]) the medium font is used.
pub const MEDIUM_CELL_HEIGHT: u32 = 24;

const _: () = assert!(SMALL_CELL_HEIGHT < MEDIUM_CELL_HEIGHT);

/// Font for text placed in a cell `height` pixels tall.
///
/// `< 20` small, `< 24` medium, otherwise large. Tall bands (at least two
/// large glyphs high) get the extra large font.
pub const fn font_for_height(height: u32) -> &'static MonoFont<'static> {
    if height < SMALL_CELL_HEIGHT {
        SMALL_FONT
    } else if height < MEDIUM_CELL_HEIGHT {
        MEDIUM_FONT
    } else if height < 2 * LARGE_FONT.character_size.height {
        LARGE_FONT
    } else {
        HUGE_FONT
    }
}

/// Font for single-line counters: small on short cells, otherwise medium.
pub const fn counter_font_for_height(height: u32) -> &'static MonoFont<'static> {
    if height < SMALL_CELL_HEIGHT { SMALL_FONT } else { MEDIUM_FONT }
}

// =============================================================================
// Primitive Styles
// =============================================================================

/// One pixel outline in `color`, no fill.
pub const fn outline(color: Rgb565) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new().stroke_color(color).stroke_width(1).build()
}

/// Solid fill in `color`.
pub const fn filled(color: Rgb565) -> PrimitiveStyle<Rgb565> { PrimitiveStyle::with_fill(color) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_for_height_bands() {
        assert_eq!(font_for_height(10).character_size, SMALL_FONT.character_size);
        assert_eq!(font_for_height(19).character_size, SMALL_FONT.character_size);
        assert_eq!(font_for_height(20).character_size, MEDIUM_FONT.character_size);
        assert_eq!(font_for_height(23).character_size, MEDIUM_FONT.character_size);
        assert_eq!(font_for_height(24).character_size, LARGE_FONT.character_size);
        assert_eq!(font_for_height(80).character_size, HUGE_FONT.character_size);
    }

    #[test]
    fn test_fonts_fit_their_band() {
        for height in [20u32, 24, 40, 80] {
            let font = font_for_height(height);
            assert!(
                font.character_size.height <= height,
                "font {}px tall overflows a {height}px cell",
                font.character_size.height
            );
        }
    }

    #[test]
    fn test_counter_font() {
        assert_eq!(counter_font_for_height(12).character_size, SMALL_FONT.character_size);
        assert_eq!(counter_font_for_height(40).character_size, MEDIUM_FONT.character_size);
    }
}
