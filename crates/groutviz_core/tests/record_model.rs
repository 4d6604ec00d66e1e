use groutviz_core::{category_color, classify, type_color, Category, HoleType, Point, Stage, Vec2};

#[test]
fn classify_matches_reference_prefixes() {
    assert_eq!(classify("PX100"), HoleType::PrimaryShoring);
    assert_eq!(classify("P100"), HoleType::Primary);
    assert_eq!(classify("SX1"), HoleType::SecondaryShoring);
    assert_eq!(classify("S1"), HoleType::Secondary);
    assert_eq!(classify("U9"), HoleType::Supplementary);
    assert_eq!(classify("Z1"), HoleType::Unknown);
}

#[test]
fn colors_cover_closed_sets_with_fallbacks() {
    let expected_categories = [
        "#4CAF50", "#2196F3", "#FFC107", "#FF5722", "#9C27B0", "#9E9E9E",
    ];
    for (category, hex) in Category::ALL.iter().zip(expected_categories) {
        assert_eq!(category_color(category).as_hex(), hex);
    }
    assert_eq!(
        category_color(&Category::from_label("Grouted Twice")).as_hex(),
        "#757575"
    );

    let expected_types = ["#4287f5", "#42f5a7", "#f5a742", "#f542a7", "#42d7f5"];
    for (kind, hex) in HoleType::ALL.into_iter().zip(expected_types) {
        assert_eq!(type_color(kind).as_hex(), hex);
    }
    assert_eq!(type_color(classify("Q7")).as_hex(), "#888888");
}

#[test]
fn point_serialization_uses_expected_wire_fields() {
    let mut point = Point::new(
        "SX004",
        Vec2::new(350.0, 150.0),
        Category::ObstructionAboveNewMat,
    );
    point.total_depth = 22.0;
    point.total_grout = 100.0;
    point.elevation_at_bottom = -22.0;
    point.date = Some("2025-03-12".to_string());
    point.stages = vec![Stage::new(6.0, 40.0), Stage::new(12.0, 60.0)];

    let json = serde_json::to_value(&point).unwrap();
    assert_eq!(json["id"], "SX004");
    assert_eq!(json["position"]["x"], 350.0);
    assert_eq!(json["total_depth"], 22.0);
    assert_eq!(json["category"], "Obstruction Above New Mat (No Grout)");
    assert_eq!(json["stages"][1]["grout_amount"], 60.0);
    assert!(json.get("hole_type").is_none());

    let decoded: Point = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, point);
}

#[test]
fn deserialize_applies_defaults_and_empty_date() {
    let value = serde_json::json!({
        "id": "P005",
        "position": { "x": 150.0, "y": 280.0 },
        "date": "",
        "category": "Planned (Not Yet Installed)"
    });

    let point: Point = serde_json::from_value(value).unwrap();
    assert_eq!(point.date, None);
    assert_eq!(point.total_grout, 0.0);
    assert!(point.stages.is_empty());
    assert_eq!(point.category, Category::Planned);
    assert_eq!(point.hole_type(), HoleType::Primary);
}

#[test]
fn unknown_category_survives_round_trip() {
    let value = serde_json::json!({
        "id": "U100",
        "position": { "x": 1.0, "y": 2.0 },
        "category": "Re-drilled"
    });

    let point: Point = serde_json::from_value(value).unwrap();
    assert_eq!(point.category, Category::Other("Re-drilled".to_string()));
    let json = serde_json::to_value(&point).unwrap();
    assert_eq!(json["category"], "Re-drilled");
}
