use groutviz_core::{
    bulb_radius, depth_to_px, sample_points, IngestService, ProfileBody,
    StaticPointRepository, Vec2, ViewConfig, ViewSession,
};

fn open_sample_session() -> ViewSession {
    let service = IngestService::new(StaticPointRepository::new(sample_points()));
    let (session, issues) = service.open_session(ViewConfig::default()).unwrap();
    assert!(issues.is_empty());
    session
}

#[test]
fn selecting_p001_lays_out_four_calibrated_bulbs() {
    let mut session = open_sample_session();
    session.select_point("P001").unwrap();

    let profile = session.profile().unwrap();
    assert_eq!(profile.title, "Profile: P001 (Primary)");

    let bulbs = profile.bulbs();
    assert_eq!(bulbs.len(), 4);
    let expected = [(5.0, 30.0), (10.0, 45.0), (15.0, 60.0), (20.0, 45.0)];
    for (bulb, (depth, gallons)) in bulbs.iter().zip(expected) {
        assert_eq!(bulb.center.x, 200.0);
        assert!((bulb.center.y - depth_to_px(depth, 500.0)).abs() < 1e-9);
        assert!((bulb.radius - bulb_radius(gallons, 35.0)).abs() < 1e-9);
        assert_eq!(bulb.fill.as_hex(), "#4CAF50");
    }
    assert!((bulbs[0].radius - 30.0 * 0.75_f64.cbrt()).abs() < 1e-9);
}

#[test]
fn unfiltered_stats_cover_reference_set() {
    let session = open_sample_session();
    let stats = session.stats();

    assert_eq!(stats.count, 7);
    assert_eq!(stats.total_grout, 810.0);
    assert!((stats.avg_depth - 115.0 / 7.0).abs() < 1e-9);
    assert_eq!(
        stats.summary_lines()[1],
        ("Total Grout", "810.0 gal".to_string())
    );
}

#[test]
fn planned_point_shows_no_data_profile() {
    let mut session = open_sample_session();
    session.select_point("P005").unwrap();

    let profile = session.profile().unwrap();
    assert!(profile.bulbs().is_empty());
    match profile.body {
        ProfileBody::NoData { message } => {
            assert_eq!(message, "Planned Point - Not Yet Installed")
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn click_after_zoom_and_pan_hits_projected_marker() {
    let mut session = open_sample_session();
    session.zoom_in();
    session.zoom_in();
    session.pointer_down(Vec2::new(300.0, 200.0));
    session.pointer_move(Vec2::new(260.0, 230.0));
    session.pointer_up();

    let screen = session.viewport().project(Vec2::new(280.0, 200.0));
    assert_eq!(session.click(screen).as_deref(), Some("PX003"));
    assert_eq!(session.selected_point().unwrap().id, "PX003");

    session.reset_view();
    assert_eq!(session.click(Vec2::new(280.0, 200.0)).as_deref(), Some("PX003"));
}

#[test]
fn filters_dim_markers_without_hiding_them() {
    let mut session = open_sample_session();
    session.toggle_category(groutviz_core::Category::Planned);

    let markers = session.plan_markers();
    assert_eq!(markers.len(), 7);
    let highlighted: Vec<_> = markers
        .iter()
        .filter(|marker| marker.highlighted)
        .map(|marker| marker.id.as_str())
        .collect();
    assert_eq!(highlighted, vec!["P005"]);
    assert_eq!(session.stats().count, 1);
    assert_eq!(session.stats().total_grout, 0.0);
}
