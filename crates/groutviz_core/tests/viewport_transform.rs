use groutviz_core::engine::viewport::{ZOOM_MAX, ZOOM_MIN};
use groutviz_core::{project, unproject, DragState, Vec2, Viewport};

fn assert_close(actual: Vec2, expected: Vec2) {
    assert!(
        actual.distance(expected) < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn unproject_inverts_project_across_zoom_range() {
    let pan = Vec2::new(-37.5, 112.25);
    let models = [
        Vec2::new(0.0, 0.0),
        Vec2::new(120.0, 150.0),
        Vec2::new(599.0, 1.5),
        Vec2::new(-40.0, 820.0),
    ];

    let mut zoom = ZOOM_MIN;
    while zoom <= ZOOM_MAX {
        for model in models {
            assert_close(unproject(project(model, zoom, pan), zoom, pan), model);
        }
        zoom += 0.25;
    }
}

#[test]
fn project_inverts_unproject_across_zoom_range() {
    let pan = Vec2::new(25.0, -10.0);
    let screens = [
        Vec2::new(0.0, 0.0),
        Vec2::new(145.0, 140.0),
        Vec2::new(600.0, 400.0),
        Vec2::new(-12.5, 33.0),
    ];

    let mut zoom = ZOOM_MIN;
    while zoom <= ZOOM_MAX {
        for screen in screens {
            assert_close(project(unproject(screen, zoom, pan), zoom, pan), screen);
        }
        zoom += 0.25;
    }
}

#[test]
fn out_of_range_zoom_is_clamped_in_both_directions() {
    let pan = Vec2::new(5.0, 5.0);
    let model = Vec2::new(100.0, 40.0);

    assert_close(project(model, 10.0, pan), project(model, ZOOM_MAX, pan));
    assert_close(project(model, 0.01, pan), project(model, ZOOM_MIN, pan));
    for zoom in [0.0, 0.1, 7.0, f64::NAN] {
        assert_close(unproject(project(model, zoom, pan), zoom, pan), model);
    }
}

#[test]
fn zoom_in_saturates_at_max() {
    let mut viewport = Viewport::new();
    viewport.set_zoom(2.95);

    viewport.zoom_in();
    assert_eq!(viewport.zoom(), ZOOM_MAX);
    viewport.zoom_in();
    assert_eq!(viewport.zoom(), ZOOM_MAX);
}

#[test]
fn wheel_direction_and_bounds() {
    let mut viewport = Viewport::new();
    for _ in 0..40 {
        viewport.wheel(120.0);
    }
    assert_eq!(viewport.zoom(), ZOOM_MIN);

    viewport.wheel(-3.0);
    assert!((viewport.zoom() - 0.6).abs() < 1e-9);

    viewport.wheel(0.0);
    assert!((viewport.zoom() - 0.6).abs() < 1e-9);
}

#[test]
fn drag_pans_by_pointer_displacement() {
    let mut viewport = Viewport::new();
    viewport.pointer_down(Vec2::new(100.0, 100.0));
    assert!(viewport.pointer_move(Vec2::new(150.0, 80.0)));
    viewport.pointer_up();
    assert_eq!(viewport.pan(), Vec2::new(50.0, -20.0));

    viewport.pointer_down(Vec2::new(10.0, 10.0));
    viewport.pointer_move(Vec2::new(20.0, 30.0));
    viewport.pointer_leave();
    assert_eq!(viewport.pan(), Vec2::new(60.0, 0.0));
    assert_eq!(viewport.drag_state(), DragState::Idle);

    assert!(!viewport.pointer_move(Vec2::new(500.0, 500.0)));
    assert_eq!(viewport.pan(), Vec2::new(60.0, 0.0));
}

#[test]
fn reset_restores_identity_transform() {
    let mut viewport = Viewport::new();
    viewport.zoom_in();
    viewport.zoom_in();
    viewport.pointer_down(Vec2::ZERO);
    viewport.pointer_move(Vec2::new(-80.0, 45.0));
    viewport.pointer_up();

    viewport.reset();
    assert_eq!(viewport.zoom(), 1.0);
    assert_eq!(viewport.pan(), Vec2::ZERO);
    assert_eq!(viewport.zoom_label(), "Zoom: 1.0x");
    assert_eq!(viewport.css_transform(), "translate(0px, 0px) scale(1)");
    assert_close(viewport.project(Vec2::new(12.0, 34.0)), Vec2::new(12.0, 34.0));
}

#[test]
fn projection_after_zoom_and_pan() {
    let mut viewport = Viewport::new();
    viewport.set_zoom(2.0);
    viewport.pointer_down(Vec2::new(0.0, 0.0));
    viewport.pointer_move(Vec2::new(10.0, -5.0));
    viewport.pointer_up();

    assert_close(viewport.project(Vec2::new(120.0, 150.0)), Vec2::new(250.0, 295.0));
    assert_close(viewport.unproject(Vec2::new(250.0, 295.0)), Vec2::new(120.0, 150.0));
}
