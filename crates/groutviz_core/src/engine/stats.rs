//! Summary statistics over the visible point set.

use crate::model::point::{finite_or_zero, Point};
use serde::Serialize;

/// Aggregates shown in the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PointStats {
    pub count: usize,
    /// Gallons.
    pub total_grout: f64,
    /// Feet. `0` when `count == 0`.
    pub avg_depth: f64,
    /// Gallons per hole. `0` when `count == 0`.
    pub avg_grout: f64,
}

impl PointStats {
    /// Panel rows as `(label, value)` pairs, values to one decimal.
    pub fn summary_lines(&self) -> [(&'static str, String); 4] {
        [
            ("Total Points", self.count.to_string()),
            ("Total Grout", format!("{:.1} gal", self.total_grout)),
            ("Avg. Depth", format!("{:.1} ft", self.avg_depth)),
            ("Avg. Grout/Hole", format!("{:.1} gal", self.avg_grout)),
        ]
    }
}

/// Computes statistics from scratch over `points`.
///
/// Non-finite field values count as zero; an empty input yields all zeros.
pub fn compute_stats<'a, I>(points: I) -> PointStats
where
    I: IntoIterator<Item = &'a Point>,
{
    let (count, total_grout, total_depth) =
        points
            .into_iter()
            .fold((0_usize, 0.0_f64, 0.0_f64), |(count, grout, depth), point| {
                (
                    count + 1,
                    grout + finite_or_zero(point.total_grout),
                    depth + finite_or_zero(point.total_depth),
                )
            });

    if count == 0 {
        return PointStats::default();
    }

    PointStats {
        count,
        total_grout,
        avg_depth: total_depth / count as f64,
        avg_grout: total_grout / count as f64,
    }
}
