//! Plan-view pan/zoom transform and drag state machine.
//!
//! # Responsibility
//! - Track zoom, pan offset and pointer drag state for one plan view.
//! - Map model coordinates to screen pixels and back.
//!
//! # Invariants
//! - `zoom` is clamped to `[ZOOM_MIN, ZOOM_MAX]` after every mutation.
//! - While dragging, `pan = pointer - anchor` (absolute, never accumulated).
//! - Non-finite pointer/wheel input is ignored and leaves state unchanged.

use crate::model::geometry::Vec2;

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Pointer drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `anchor = pointer_at_press - pan_at_press`.
    Dragging { anchor: Vec2 },
}

/// Zoom/pan state of the plan view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Vec2,
    drag: DragState,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Vec2::ZERO,
            drag: DragState::Idle,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Pan offset in screen pixels.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Idle → Dragging. Records the anchor so later moves are absolute.
    pub fn pointer_down(&mut self, pointer: Vec2) {
        if !pointer.is_finite() {
            return;
        }
        self.drag = DragState::Dragging {
            anchor: pointer - self.pan,
        };
    }

    /// Updates pan while dragging. Returns whether pan changed.
    pub fn pointer_move(&mut self, pointer: Vec2) -> bool {
        let DragState::Dragging { anchor } = self.drag else {
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }
        let next = pointer - anchor;
        let changed = next != self.pan;
        self.pan = next;
        changed
    }

    /// Dragging → Idle.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Leaving the canvas ends a drag exactly like releasing the pointer.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Applies one wheel notch: scrolling down (`delta_y > 0`) zooms out.
    ///
    /// A zero delta leaves zoom unchanged.
    pub fn wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let direction = if delta_y > 0.0 { -1.0 } else { 1.0 };
        self.set_zoom(self.zoom + direction * ZOOM_STEP);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Sets zoom, clamped to the allowed range. Non-finite requests are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = clamp_zoom(zoom);
        }
    }

    /// Restores zoom 1 and zero pan regardless of current state.
    ///
    /// Drag state is left untouched.
    pub fn reset(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.pan = Vec2::ZERO;
    }

    /// Model → screen.
    pub fn project(&self, model: Vec2) -> Vec2 {
        project(model, self.zoom, self.pan)
    }

    /// Screen → model, used for hit-testing.
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        unproject(screen, self.zoom, self.pan)
    }

    /// CSS transform for the content layer (origin `0 0`).
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }

    /// Header label, e.g. `Zoom: 1.0x`.
    pub fn zoom_label(&self) -> String {
        format!("Zoom: {:.1}x", self.zoom)
    }
}

/// Clamps `zoom` to `[ZOOM_MIN, ZOOM_MAX]`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// `screen = pan + zoom * model` (scale origin at the content's top-left).
///
/// `zoom` is clamped first, so `project` and `unproject` stay inverses for
/// any input.
pub fn project(model: Vec2, zoom: f64, pan: Vec2) -> Vec2 {
    pan + model * effective_zoom(zoom)
}

/// Inverse of `project`.
pub fn unproject(screen: Vec2, zoom: f64, pan: Vec2) -> Vec2 {
    (screen - pan) / effective_zoom(zoom)
}

fn effective_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        clamp_zoom(zoom)
    } else {
        DEFAULT_ZOOM
    }
}

#[cfg(test)]
mod tests {
    use super::{DragState, Viewport, ZOOM_MAX, ZOOM_MIN};
    use crate::model::geometry::Vec2;

    #[test]
    fn drag_uses_absolute_pan() {
        let mut viewport = Viewport::new();
        viewport.pointer_down(Vec2::new(100.0, 100.0));
        assert!(viewport.pointer_move(Vec2::new(130.0, 90.0)));
        assert!(viewport.pointer_move(Vec2::new(140.0, 95.0)));
        assert_eq!(viewport.pan(), Vec2::new(40.0, -5.0));
        viewport.pointer_up();

        // A second drag starts from the current pan.
        viewport.pointer_down(Vec2::new(0.0, 0.0));
        viewport.pointer_move(Vec2::new(10.0, 10.0));
        assert_eq!(viewport.pan(), Vec2::new(50.0, 5.0));
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut viewport = Viewport::new();
        assert!(!viewport.pointer_move(Vec2::new(50.0, 50.0)));
        assert_eq!(viewport.pan(), Vec2::ZERO);
    }

    #[test]
    fn leave_ends_drag() {
        let mut viewport = Viewport::new();
        viewport.pointer_down(Vec2::new(1.0, 1.0));
        assert!(viewport.is_dragging());
        viewport.pointer_leave();
        assert_eq!(viewport.drag_state(), DragState::Idle);
    }

    #[test]
    fn wheel_direction_and_clamp() {
        let mut viewport = Viewport::new();
        viewport.wheel(120.0);
        assert!((viewport.zoom() - 0.9).abs() < 1e-9);
        viewport.wheel(-120.0);
        viewport.wheel(-120.0);
        assert!((viewport.zoom() - 1.1).abs() < 1e-9);
        viewport.wheel(0.0);
        assert!((viewport.zoom() - 1.1).abs() < 1e-9);

        for _ in 0..50 {
            viewport.wheel(1.0);
        }
        assert_eq!(viewport.zoom(), ZOOM_MIN);
        for _ in 0..50 {
            viewport.wheel(-1.0);
        }
        assert_eq!(viewport.zoom(), ZOOM_MAX);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(f64::NAN);
        viewport.wheel(f64::INFINITY);
        viewport.pointer_down(Vec2::new(f64::NAN, 0.0));
        assert_eq!(viewport, Viewport::new());
    }

    #[test]
    fn reset_during_drag_keeps_original_anchor() {
        let mut viewport = Viewport::new();
        viewport.pointer_down(Vec2::new(10.0, 10.0));
        viewport.pointer_move(Vec2::new(60.0, 30.0));
        viewport.reset();
        assert_eq!(viewport.pan(), Vec2::ZERO);
        assert_eq!(viewport.zoom(), 1.0);
        assert!(viewport.is_dragging());

        viewport.pointer_move(Vec2::new(70.0, 40.0));
        assert_eq!(viewport.pan(), Vec2::new(60.0, 30.0));
    }

    #[test]
    fn labels_format_current_state() {
        let mut viewport = Viewport::new();
        viewport.zoom_in();
        assert_eq!(viewport.zoom_label(), "Zoom: 1.1x");
        viewport.reset();
        assert_eq!(viewport.css_transform(), "translate(0px, 0px) scale(1)");
    }
}
