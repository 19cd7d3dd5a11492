//! Color constants and the screen theme.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to the ST7789 panel and needs no conversion when
//! written to the display buffer.
//!
//! # Themes
//!
//! The default theme is light text on black. The `inverted` feature swaps
//! foreground and background; `monochrome` paints every battery tier in the
//! foreground color for panels that cannot show color.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::battery::ColorTier;

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Default background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default foreground.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Critical battery and the "X" marker.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Normal battery fill.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow (31, 63, 0). Low battery fill.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Pure blue (0, 0, 31). Connected BLE profile.
pub const BLUE: Rgb565 = Rgb565::BLUE;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Dark gray for idle outlines. RGB565: (8, 16, 8), roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Orange for bonded-but-disconnected profiles. RGB565: (31, 32, 0).
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

// =============================================================================
// Theme
// =============================================================================

/// Foreground/background pair plus whether tier colors are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub foreground: Rgb565,
    pub background: Rgb565,
    pub color_capable: bool,
}

impl Theme {
    /// Light text on black.
    pub const DARK: Self = Self {
        foreground: WHITE,
        background: BLACK,
        color_capable: true,
    };

    /// Black text on white.
    pub const LIGHT: Self = Self {
        foreground: BLACK,
        background: WHITE,
        color_capable: true,
    };

    /// Theme selected by the `inverted` and `monochrome` features.
    pub const fn from_cargo_features() -> Self {
        let base = if cfg!(feature = "inverted") { Self::LIGHT } else { Self::DARK };
        Self {
            color_capable: !cfg!(feature = "monochrome"),
            ..base
        }
    }

    /// Same theme with tier colors disabled.
    pub const fn monochrome(self) -> Self {
        Self {
            color_capable: false,
            ..self
        }
    }

    /// Meter fill color for a battery tier.
    pub const fn tier_color(
        &self,
        tier: ColorTier,
    ) -> Rgb565 {
        if !self.color_capable {
            return self.foreground;
        }
        match tier {
            ColorTier::Normal => GREEN,
            ColorTier::Low => YELLOW,
            ColorTier::Critical => RED,
        }
    }

    /// Color of the "X" marker shown for unknown levels.
    pub const fn error_color(&self) -> Rgb565 { self.tier_color(ColorTier::Critical) }
}

impl Default for Theme {
    fn default() -> Self { Self::from_cargo_features() }
}
