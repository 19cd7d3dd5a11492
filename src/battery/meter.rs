//! Battery meter geometry.
//!
//! Turns a charge level into the filled part of the battery glyph and the
//! color tier used to paint it. Pure arithmetic; the widget does the drawing.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::error::Error;
use crate::thresholds::{BATTERY_CRITICAL_MAX, BATTERY_FULL, BATTERY_LOW_MAX};

/// Charge level as reported by a battery source.
///
/// Reports below 1 % mean the source is disconnected or has not reported
/// yet; reports above 100 % are malformed. Both are [`BatteryLevel::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryLevel {
    Unknown,
    Percent(u8),
}

impl BatteryLevel {
    /// Classify a raw state-of-charge report.
    pub const fn from_report(level: u8) -> Self {
        if level < 1 || level > 100 { Self::Unknown } else { Self::Percent(level) }
    }

    /// Like [`BatteryLevel::from_report`], but reports above 100 % are an error.
    /// A 0 % report is still a valid disconnect.
    pub const fn try_from_report(level: u8) -> Result<Self, Error> {
        if level > BATTERY_FULL { Err(Error::OutOfRangeLevel(level)) } else { Ok(Self::from_report(level)) }
    }

    /// Percentage, if known.
    pub const fn percent(self) -> Option<u8> {
        match self {
            Self::Unknown => None,
            Self::Percent(p) => Some(p),
        }
    }

    pub const fn is_known(self) -> bool { matches!(self, Self::Percent(_)) }
}

/// Discrete color class of a battery level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorTier {
    Critical,
    Low,
    Normal,
}

impl ColorTier {
    /// Tier for a level: above 30 % normal, above 10 % low, otherwise critical.
    pub const fn for_level(level: BatteryLevel) -> Self {
        match level {
            BatteryLevel::Percent(p) if p > BATTERY_LOW_MAX => Self::Normal,
            BatteryLevel::Percent(p) if p > BATTERY_CRITICAL_MAX => Self::Low,
            _ => Self::Critical,
        }
    }
}

/// Direction the meter fills in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeterOrientation {
    /// Left to right, proportional to width.
    #[default]
    Horizontal,
    /// Bottom to top, proportional to height.
    Vertical,
}

/// Filled part of a meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeterGeometry {
    /// Level known: fill `fill` with the `tier` color.
    Filled { fill: Rectangle, tier: ColorTier },
    /// Level unknown: draw no meter, show the error marker instead.
    Unavailable,
}

impl MeterGeometry {
    pub const fn filled_width(&self) -> u32 {
        match self {
            Self::Filled { fill, .. } => fill.size.width,
            Self::Unavailable => 0,
        }
    }

    pub const fn filled_height(&self) -> u32 {
        match self {
            Self::Filled { fill, .. } => fill.size.height,
            Self::Unavailable => 0,
        }
    }

    /// Tier of the level. Unknown levels are critical.
    pub const fn tier(&self) -> ColorTier {
        match self {
            Self::Filled { tier, .. } => *tier,
            Self::Unavailable => ColorTier::Critical,
        }
    }
}

/// Pixels to fill out of `meter_px` for `percent`, rounding half up.
///
/// `(meter_px * percent + 50) / 100`, clamped to `meter_px`.
pub const fn fill_extent(
    meter_px: u32,
    percent: u8,
) -> u32 {
    let filled = (meter_px * percent as u32 + 50) / 100;
    if filled > meter_px { meter_px } else { filled }
}

/// Compute the meter fill for `level` inside `bounds`.
pub const fn render(
    level: BatteryLevel,
    bounds: Rectangle,
    orientation: MeterOrientation,
) -> MeterGeometry {
    let percent = match level {
        BatteryLevel::Percent(p) => p,
        BatteryLevel::Unknown => return MeterGeometry::Unavailable,
    };
    let tier = ColorTier::for_level(level);

    let fill = match orientation {
        MeterOrientation::Horizontal => {
            let width = fill_extent(bounds.size.width, percent);
            Rectangle::new(bounds.top_left, Size::new(width, bounds.size.height))
        }
        MeterOrientation::Vertical => {
            let height = fill_extent(bounds.size.height, percent);
            let top = bounds.top_left.y + (bounds.size.height - height) as i32;
            Rectangle::new(Point::new(bounds.top_left.x, top), Size::new(bounds.size.width, height))
        }
    };

    MeterGeometry::Filled { fill, tier }
}
