//! Column planning.
//!
//! Derives, from the measured container width, the working width, the
//! effective horizontal gutter, the column count and the column width.

use crate::config::LayoutConfig;
use serde::Serialize;

/// Result of planning one layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPlan {
    /// Working width (measured width, raised to the base width).
    pub width: f32,
    /// Whether the measured width was below the base width.
    pub clamped: bool,
    /// Number of columns, at least 1.
    pub column_count: usize,
    /// Effective horizontal gutter for this pass.
    pub gutter_x: f32,
    /// Width written onto every element.
    pub column_width: f32,
}

/// Plan columns for a container currently `measured_width` wide.
pub fn plan_columns(config: &LayoutConfig, measured_width: f32) -> ColumnPlan {
    let clamped = measured_width < config.base_width;
    let width = if clamped { config.base_width } else { measured_width };

    let provisional = provisional_column_count(config, width, config.gutter_x);
    let (column_count, gutter_x) = if provisional <= 1 {
        // Reduced gutters could make two columns fit; stay at one.
        (1, config.ultimate_gutter)
    } else {
        let gutter_x = if width < config.base_width + 2.0 * config.gutter_x {
            0.0
        } else {
            config.gutter_x
        };
        let count = provisional_column_count(config, width, gutter_x).max(1);
        (count, gutter_x)
    };

    let column_width = column_width(config, width, column_count, gutter_x);

    ColumnPlan {
        width,
        clamped,
        column_count,
        gutter_x,
        column_width,
    }
}

/// Number of `base_width` columns that fit in `width` with gutter `gutter`.
///
/// Non-finite results, from zero-sized divisors, count as no column. Columns
/// narrower than one pixel are not counted, so the result never exceeds
/// `width`.
pub fn provisional_column_count(config: &LayoutConfig, width: f32, gutter: f32) -> usize {
    let span = if config.surrounding_gutter {
        width - gutter
    } else {
        width + gutter
    };
    let raw = (span / (config.base_width + gutter)).floor();
    if !raw.is_finite() || raw < 1.0 {
        return 0;
    }
    raw.min(width.max(1.0).floor()) as usize
}

/// Width of each column, rounded to two decimals.
pub fn column_width(config: &LayoutConfig, width: f32, column_count: usize, gutter: f32) -> f32 {
    let count = column_count.max(1) as f32;
    let raw = if config.surrounding_gutter {
        (width - gutter) / count - gutter
    } else {
        (width + gutter) / count - gutter
    };
    round_hundredths(raw)
}

#[inline]
fn round_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
