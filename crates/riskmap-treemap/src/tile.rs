//! Area subdivision for one level of the treemap.
//!
//! Tilers receive the child values of a single parent (already sorted
//! largest first) and split the parent's inner rectangle into one rectangle
//! per child, each with area proportional to its value. Padding and rounding
//! are applied by the layout engine, not here.

use riskmap_core::Rect;
use serde::{Deserialize, Serialize};

/// Target aspect ratio for squarified rows (the golden ratio).
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Tiling algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileStrategy {
    /// Squarify (default, rows chosen for near-golden aspect ratios).
    #[default]
    Squarify,
    /// Slice and dice (alternating horizontal/vertical by depth).
    SliceDice,
}

impl TileStrategy {
    /// Split `bounds` among `values`.
    ///
    /// `depth` is the parent's depth relative to the laid-out root; only
    /// slice-and-dice uses it.
    #[must_use]
    pub fn tile(self, values: &[f64], bounds: Rect, depth: usize) -> Vec<Rect> {
        let total: f64 = values.iter().sum();
        match self {
            Self::Squarify => squarify(values, total, bounds, GOLDEN_RATIO),
            Self::SliceDice if depth % 2 == 1 => slice(values, total, bounds),
            Self::SliceDice => dice(values, total, bounds),
        }
    }
}

/// Lay values left to right across the full height of `bounds`.
#[must_use]
pub fn dice(values: &[f64], total: f64, bounds: Rect) -> Vec<Rect> {
    let k = if total > 0.0 {
        bounds.width() / total
    } else {
        0.0
    };
    let mut x = bounds.x0;
    values
        .iter()
        .map(|v| {
            let x0 = x;
            x += v * k;
            Rect::new(x0, bounds.y0, x, bounds.y1)
        })
        .collect()
}

/// Lay values top to bottom across the full width of `bounds`.
#[must_use]
pub fn slice(values: &[f64], total: f64, bounds: Rect) -> Vec<Rect> {
    let k = if total > 0.0 {
        bounds.height() / total
    } else {
        0.0
    };
    let mut y = bounds.y0;
    values
        .iter()
        .map(|v| {
            let y0 = y;
            y += v * k;
            Rect::new(bounds.x0, y0, bounds.x1, y)
        })
        .collect()
}

/// Squarified tiling (Bruls, Huizing, van Wijk).
///
/// Children are consumed in order and packed into rows along the shorter
/// side; a row grows while adding the next child does not worsen its worst
/// aspect ratio relative to `ratio`.
#[must_use]
pub fn squarify(values: &[f64], total: f64, bounds: Rect, ratio: f64) -> Vec<Rect> {
    let n = values.len();
    let mut out = Vec::with_capacity(n);
    let (mut x0, mut y0, x1, y1) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    let mut remaining = total;
    let mut i0 = 0;
    let mut i1 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Skip ahead to the next non-empty value.
        let mut row_sum;
        loop {
            row_sum = values[i1];
            i1 += 1;
            if row_sum != 0.0 || i1 >= n {
                break;
            }
        }
        let mut min_value = row_sum;
        let mut max_value = row_sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut beta = row_sum * row_sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while i1 < n {
            let value = values[i1];
            row_sum += value;
            min_value = min_value.min(value);
            max_value = max_value.max(value);
            beta = row_sum * row_sum * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                row_sum -= value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = &values[i0..i1];
        if dx < dy {
            let y_end = if remaining > 0.0 {
                y0 + dy * row_sum / remaining
            } else {
                y1
            };
            out.extend(dice(row, row_sum, Rect::new(x0, y0, x1, y_end)));
            if remaining > 0.0 {
                y0 = y_end;
            }
        } else {
            let x_end = if remaining > 0.0 {
                x0 + dx * row_sum / remaining
            } else {
                x1
            };
            out.extend(slice(row, row_sum, Rect::new(x0, y0, x_end, y1)));
            if remaining > 0.0 {
                x0 = x_end;
            }
        }
        remaining -= row_sum;
        i0 = i1;
    }

    out
}
