//! Per-session view state and input routing.
//!
//! # Responsibility
//! - Own the mutable UI state of one plan/profile session: selected point,
//!   filter sets and viewport.
//! - Translate discrete input events into engine calls.
//!
//! # Invariants
//! - Records are never mutated by a session.
//! - `selected` always names a point present in `points` or is `None`.
//! - Every derived view (stats, markers, profile) is recomputed on demand.

use crate::config::ViewConfig;
use crate::engine::filter::{visible_points, FilterSelection};
use crate::engine::stats::{compute_stats, PointStats};
use crate::engine::viewport::Viewport;
use crate::layout::plan::{hit_test, plan_grid, plan_markers, GridLine, PlanMarker};
use crate::layout::profile::{profile_view, ProfileView};
use crate::model::classify::{Category, HoleType};
use crate::model::geometry::Vec2;
use crate::model::point::Point;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable handle for one view session.
pub type SessionId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    PointNotFound(String),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PointNotFound(id) => write!(f, "point not found: {id}"),
        }
    }
}

impl Error for SessionError {}

/// One interactive plan/profile session over a fixed record set.
#[derive(Debug, Clone)]
pub struct ViewSession {
    id: SessionId,
    config: ViewConfig,
    points: Vec<Point>,
    filter: FilterSelection,
    viewport: Viewport,
    selected: Option<String>,
}

impl ViewSession {
    /// Starts a session with empty filters, default viewport, no selection.
    pub fn new(points: Vec<Point>, config: ViewConfig) -> Self {
        let id = Uuid::new_v4();
        debug!(
            "event=session_open module=session status=ok session_id={} point_count={}",
            id,
            points.len()
        );
        Self {
            id,
            config,
            points,
            filter: FilterSelection::new(),
            viewport: Viewport::new(),
            selected: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pointer_down(&mut self, pointer: Vec2) {
        self.viewport.pointer_down(pointer);
    }

    pub fn pointer_move(&mut self, pointer: Vec2) -> bool {
        self.viewport.pointer_move(pointer)
    }

    pub fn pointer_up(&mut self) {
        self.viewport.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.viewport.pointer_leave();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.viewport.wheel(delta_y);
        self.log_zoom("wheel");
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.log_zoom("zoom_in");
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.log_zoom("zoom_out");
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.log_zoom("reset");
    }

    /// Returns whether `kind` is selected after the toggle.
    pub fn toggle_type(&mut self, kind: HoleType) -> bool {
        let selected = self.filter.toggle_type(kind);
        debug!(
            "event=filter_toggle module=session session_id={} dimension=type value={} selected={}",
            self.id, kind, selected
        );
        selected
    }

    /// Returns whether `category` is selected after the toggle.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        let label = category.label().to_string();
        let selected = self.filter.toggle_category(category);
        debug!(
            "event=filter_toggle module=session session_id={} dimension=category value={} selected={}",
            self.id, label, selected
        );
        selected
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Selects the point with `point_id`.
    ///
    /// # Errors
    /// - `SessionError::PointNotFound` when no record has that id; the
    ///   previous selection is kept.
    pub fn select_point(&mut self, point_id: &str) -> Result<&Point, SessionError> {
        let index = self
            .points
            .iter()
            .position(|point| point.id == point_id)
            .ok_or_else(|| SessionError::PointNotFound(point_id.to_string()))?;
        let point = &self.points[index];
        self.selected = Some(point.id.clone());
        debug!(
            "event=point_select module=session session_id={} point_id={}",
            self.id, point.id
        );
        Ok(point)
    }

    /// Hit-tests a click at `screen` and selects the point under it.
    ///
    /// Returns the selected point id. A click on empty canvas keeps the
    /// current selection.
    pub fn click(&mut self, screen: Vec2) -> Option<String> {
        let hit = hit_test(&self.points, screen, &self.viewport, self.config.point_size)?;
        let id = hit.id.clone();
        self.selected = Some(id.clone());
        debug!(
            "event=point_select module=session session_id={} point_id={} via=click",
            self.id, id
        );
        Some(id)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_point(&self) -> Option<&Point> {
        let id = self.selected.as_deref()?;
        self.points.iter().find(|point| point.id == id)
    }

    pub fn visible_points(&self) -> Vec<&Point> {
        visible_points(&self.points, &self.filter)
    }

    pub fn stats(&self) -> PointStats {
        compute_stats(self.visible_points())
    }

    pub fn plan_markers(&self) -> Vec<PlanMarker> {
        plan_markers(
            &self.points,
            &self.filter,
            self.selected.as_deref(),
            self.config.point_size,
        )
    }

    pub fn plan_grid(&self) -> Vec<GridLine> {
        plan_grid(self.config.plan_width, self.config.plan_height)
    }

    /// Profile of the selected point, if any.
    pub fn profile(&self) -> Option<ProfileView> {
        self.selected_point()
            .map(|point| profile_view(point, &self.config))
    }

    fn log_zoom(&self, trigger: &str) {
        debug!(
            "event=viewport_zoom module=session session_id={} trigger={} zoom={:.2}",
            self.id,
            trigger,
            self.viewport.zoom()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionError, ViewSession};
    use crate::config::ViewConfig;
    use crate::model::classify::HoleType;
    use crate::model::geometry::Vec2;
    use crate::model::sample::sample_points;

    fn session() -> ViewSession {
        ViewSession::new(sample_points(), ViewConfig::default())
    }

    #[test]
    fn new_session_starts_unfiltered_and_unselected() {
        let session = session();
        assert!(session.filter().is_empty());
        assert_eq!(session.viewport().zoom(), 1.0);
        assert!(session.selected_point().is_none());
        assert!(session.profile().is_none());
        assert_eq!(session.stats().count, 7);
    }

    #[test]
    fn select_unknown_point_keeps_previous_selection() {
        let mut session = session();
        session.select_point("S002").unwrap();

        let err = session.select_point("Z999").unwrap_err();
        assert_eq!(err, SessionError::PointNotFound("Z999".to_string()));
        assert_eq!(session.selected_point().unwrap().id, "S002");
    }

    #[test]
    fn click_on_empty_canvas_keeps_selection() {
        let mut session = session();
        assert_eq!(session.click(Vec2::new(120.0, 150.0)).as_deref(), Some("P001"));
        assert_eq!(session.click(Vec2::new(590.0, 390.0)), None);
        assert_eq!(session.selected_point().unwrap().id, "P001");

        session.deselect();
        assert!(session.profile().is_none());
    }

    #[test]
    fn filters_drive_stats() {
        let mut session = session();
        session.toggle_type(HoleType::Primary);
        let stats = session.stats();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_grout, 180.0);
    }

    #[test]
    fn each_session_gets_a_fresh_v4_id() {
        let first = session();
        let second = session();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.id().get_version_num(), 4);
    }
}
