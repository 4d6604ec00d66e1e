//! Reference record set shipped with the tool for demos and smoke checks.

use crate::model::classify::Category;
use crate::model::geometry::Vec2;
use crate::model::point::{Point, Stage};

/// Returns the seven reference records (five installed, two without data).
pub fn sample_points() -> Vec<Point> {
    vec![
        installed(
            "P001",
            (120.0, 150.0),
            25.0,
            180.0,
            "2025-03-05",
            Category::InstalledToDenseSoil,
            &[(5.0, 30.0), (10.0, 45.0), (15.0, 60.0), (20.0, 45.0)],
        ),
        installed(
            "S002",
            (200.0, 100.0),
            20.0,
            130.0,
            "2025-03-07",
            Category::InstalledToTopOfFooting,
            &[(5.0, 20.0), (10.0, 50.0), (15.0, 60.0)],
        ),
        installed(
            "PX003",
            (280.0, 200.0),
            30.0,
            220.0,
            "2025-03-10",
            Category::ObstructionBelowNewMat,
            &[
                (5.0, 25.0),
                (10.0, 35.0),
                (15.0, 70.0),
                (20.0, 55.0),
                (25.0, 35.0),
            ],
        ),
        installed(
            "SX004",
            (350.0, 150.0),
            22.0,
            160.0,
            "2025-03-12",
            Category::ObstructionAboveNewMat,
            &[(6.0, 40.0), (12.0, 60.0), (18.0, 60.0)],
        ),
        installed(
            "U001",
            (180.0, 220.0),
            18.0,
            120.0,
            "2025-03-08",
            Category::InstalledToDenseSoil,
            &[(6.0, 40.0), (12.0, 40.0), (18.0, 40.0)],
        ),
        Point::new("P005", Vec2::new(150.0, 280.0), Category::Planned),
        Point::new(
            "P006",
            Vec2::new(300.0, 300.0),
            Category::NoPointAccessIssues,
        ),
    ]
}

fn installed(
    id: &str,
    (x, y): (f64, f64),
    depth: f64,
    grout: f64,
    date: &str,
    category: Category,
    stages: &[(f64, f64)],
) -> Point {
    let mut point = Point::new(id, Vec2::new(x, y), category);
    point.total_depth = depth;
    point.total_grout = grout;
    point.elevation_at_bottom = -depth;
    point.date = Some(date.to_string());
    point.stages = stages
        .iter()
        .map(|&(depth, amount)| Stage::new(depth, amount))
        .collect();
    point
}

#[cfg(test)]
mod tests {
    use super::sample_points;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique_and_records_consistent() {
        let points = sample_points();
        assert_eq!(points.len(), 7);

        let ids: HashSet<_> = points.iter().map(|point| point.id.as_str()).collect();
        assert_eq!(ids.len(), points.len());
        for point in &points {
            assert!(point.issues().is_empty(), "{}: {:?}", point.id, point.issues());
        }
    }
}
