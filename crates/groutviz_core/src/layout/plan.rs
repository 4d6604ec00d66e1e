//! Plan-view render geometry.
//!
//! # Invariants
//! - Every point gets a marker; filtered-out points are dimmed, not dropped.
//! - Marker geometry is in model units; the presentation layer applies the
//!   viewport transform to the whole content layer at once.

use crate::engine::filter::FilterSelection;
use crate::engine::viewport::Viewport;
use crate::model::classify::{category_color, Color, HoleType};
use crate::model::geometry::Vec2;
use crate::model::point::Point;
use serde::Serialize;

/// Fill of markers hidden by the active filters.
pub const DIMMED_FILL: Color = Color::from_static("#cccccc");
pub const DIMMED_OPACITY: f64 = 0.5;
/// Grid lines drawn per axis.
pub const GRID_LINES: usize = 10;

/// One point marker, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanMarker {
    pub id: String,
    pub hole_type: HoleType,
    pub center: Vec2,
    /// Top-left corner of the marker box.
    pub origin: Vec2,
    pub size: f64,
    pub fill: Color,
    pub opacity: f64,
    /// Passes the active filters.
    pub highlighted: bool,
    pub selected: bool,
    /// Planned points get a dashed outline.
    pub dashed_border: bool,
    pub label: String,
    /// `"{elevation}ft"`, present only when the bottom elevation is non-zero.
    pub elevation_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub start: Vec2,
    pub end: Vec2,
}

/// Builds markers for all `points` in input order.
pub fn plan_markers(
    points: &[Point],
    selection: &FilterSelection,
    selected_id: Option<&str>,
    point_size: f64,
) -> Vec<PlanMarker> {
    let half = point_size / 2.0;
    points
        .iter()
        .map(|point| {
            let highlighted = selection.is_visible(point);
            let (fill, opacity) = if highlighted {
                (category_color(&point.category), 1.0)
            } else {
                (DIMMED_FILL, DIMMED_OPACITY)
            };
            PlanMarker {
                id: point.id.clone(),
                hole_type: point.hole_type(),
                center: point.position,
                origin: point.position - Vec2::new(half, half),
                size: point_size,
                fill,
                opacity,
                highlighted,
                selected: selected_id == Some(point.id.as_str()),
                dashed_border: point.is_planned(),
                label: point.id.clone(),
                elevation_label: (point.elevation_at_bottom != 0.0)
                    .then(|| format!("{}ft", point.elevation_at_bottom)),
            }
        })
        .collect()
}

/// Evenly spaced grid: `GRID_LINES` horizontal then `GRID_LINES` vertical.
pub fn plan_grid(width: f64, height: f64) -> Vec<GridLine> {
    let divisions = (GRID_LINES - 1) as f64;
    let horizontal = (0..GRID_LINES).map(|i| {
        let y = i as f64 * height / divisions;
        GridLine {
            start: Vec2::new(0.0, y),
            end: Vec2::new(width, y),
        }
    });
    let vertical = (0..GRID_LINES).map(|i| {
        let x = i as f64 * width / divisions;
        GridLine {
            start: Vec2::new(x, 0.0),
            end: Vec2::new(x, height),
        }
    });
    horizontal.chain(vertical).collect()
}

/// Returns the topmost point whose marker contains `screen`.
///
/// Markers are drawn in input order, so later points win overlaps.
pub fn hit_test<'a>(
    points: &'a [Point],
    screen: Vec2,
    viewport: &Viewport,
    point_size: f64,
) -> Option<&'a Point> {
    if !screen.is_finite() {
        return None;
    }
    let model = viewport.unproject(screen);
    let radius = point_size / 2.0;
    points
        .iter()
        .rev()
        .find(|point| point.position.distance(model) <= radius)
}
