//! Profile (cross-section) render geometry for one selected point.
//!
//! # Responsibility
//! - Lay out the depth scale, hole line, stage bulbs and labels.
//! - Produce the no-data message and detail/legend text.
//!
//! # Invariants
//! - The depth axis always spans 0–30 ft over `profile_height`, regardless
//!   of the point's total depth.
//! - Bulb radii come from `engine::bulb` and ignore plan-view zoom.

use crate::config::ViewConfig;
use crate::engine::bulb::{
    bulb_radius, depth_to_px, effective_void_percentage, PROFILE_WINDOW_FEET,
};
use crate::model::classify::{category_color, Color, HoleType};
use crate::model::geometry::Vec2;
use crate::model::point::Point;
use serde::Serialize;

/// Title shown when nothing is selected.
pub const EMPTY_PROFILE_TITLE: &str = "Profile View";
/// Prompt shown when nothing is selected.
pub const EMPTY_PROFILE_PROMPT: &str = "Click on a point to view profile";
/// Depth-scale ticks, including both ends.
pub const SCALE_TICKS: usize = 11;
pub const HOLE_LINE_WIDTH: f64 = 4.0;
const STAGE_LABEL_OFFSET: Vec2 = Vec2::new(40.0, -10.0);
const BOTTOM_MARKER_INSET: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleTick {
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageLabel {
    pub origin: Vec2,
    pub depth_text: String,
    pub grout_text: String,
}

/// One grout stage drawn as a circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulbGeometry {
    pub stage_index: usize,
    pub depth_feet: f64,
    pub grout_gallons: f64,
    pub center: Vec2,
    pub radius: f64,
    pub fill: Color,
    pub label: StageLabel,
}

/// Vertical bar from the collar down to `total_depth`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleLine {
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottomMarker {
    pub origin: Vec2,
    pub width: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProfileBody {
    Installed {
        hole: HoleLine,
        bulbs: Vec<BulbGeometry>,
        bottom: BottomMarker,
    },
    NoData {
        message: String,
    },
}

/// Complete profile panel for one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub point_id: String,
    pub hole_type: HoleType,
    pub title: String,
    pub scale: Vec<ScaleTick>,
    pub body: ProfileBody,
    pub details: Vec<String>,
    pub legend: Vec<String>,
}

impl ProfileView {
    /// Bulbs of an installed point; empty for the no-data body.
    pub fn bulbs(&self) -> &[BulbGeometry] {
        match &self.body {
            ProfileBody::Installed { bulbs, .. } => bulbs.as_slice(),
            ProfileBody::NoData { .. } => &[],
        }
    }
}

/// Builds the profile panel for `point`.
pub fn profile_view(point: &Point, config: &ViewConfig) -> ProfileView {
    let hole_type = point.hole_type();
    let body = if point.has_installation() {
        let height = depth_to_px(point.total_depth, config.profile_height);
        ProfileBody::Installed {
            hole: HoleLine {
                x: config.profile_width / 2.0,
                width: HOLE_LINE_WIDTH,
                height,
            },
            bulbs: stage_bulbs(point, config),
            bottom: BottomMarker {
                origin: Vec2::new(BOTTOM_MARKER_INSET, height - BOTTOM_MARKER_INSET),
                width: config.profile_width - 2.0 * BOTTOM_MARKER_INSET,
                text: format!("Bottom Elevation: {}ft", point.elevation_at_bottom),
            },
        }
    } else {
        ProfileBody::NoData {
            message: no_data_message(point),
        }
    };

    ProfileView {
        point_id: point.id.clone(),
        hole_type,
        title: format!("Profile: {} ({})", point.id, hole_type),
        scale: depth_scale(config.profile_height),
        body,
        details: hole_details(point),
        legend: legend(config.void_percentage),
    }
}

/// One bulb per stage, in stage order.
pub fn stage_bulbs(point: &Point, config: &ViewConfig) -> Vec<BulbGeometry> {
    let axis_x = config.profile_width / 2.0;
    let fill = category_color(&point.category);
    point
        .stages
        .iter()
        .enumerate()
        .map(|(stage_index, stage)| {
            let y = depth_to_px(stage.depth, config.profile_height);
            BulbGeometry {
                stage_index,
                depth_feet: stage.depth,
                grout_gallons: stage.grout_amount,
                center: Vec2::new(axis_x, y),
                radius: bulb_radius(stage.grout_amount, config.void_percentage),
                fill,
                label: StageLabel {
                    origin: Vec2::new(axis_x, y) + STAGE_LABEL_OFFSET,
                    depth_text: format!("Depth: {}ft", stage.depth),
                    grout_text: format!("Grout: {}gal", stage.grout_amount),
                },
            }
        })
        .collect()
}

/// Depth ticks from 0 to `PROFILE_WINDOW_FEET`.
pub fn depth_scale(profile_height: f64) -> Vec<ScaleTick> {
    let intervals = (SCALE_TICKS - 1) as f64;
    (0..SCALE_TICKS)
        .map(|i| {
            let step = i as f64;
            ScaleTick {
                y: step * profile_height / intervals,
                label: format!("{:.0}ft", step * PROFILE_WINDOW_FEET / intervals),
            }
        })
        .collect()
}

fn no_data_message(point: &Point) -> String {
    if point.is_planned() {
        "Planned Point - Not Yet Installed".to_string()
    } else {
        format!("{} - No Grout Data", point.category)
    }
}

fn hole_details(point: &Point) -> Vec<String> {
    let mut lines = vec![
        format!("ID: {}", point.id),
        format!("Type: {}", point.hole_type()),
        format!("Status: {}", point.category),
        format!("Total Depth: {} ft", point.total_depth),
        format!("Bottom Elevation: {} ft", point.elevation_at_bottom),
        format!("Total Grout: {} gallons", point.total_grout),
    ];
    if let Some(date) = point.date.as_deref() {
        lines.push(format!("Date: {date}"));
    }
    lines.push(format!("Stages: {}", point.stages.len()));
    lines
}

fn legend(void_percentage: f64) -> Vec<String> {
    vec![
        format!("Void Ratio: {}%", effective_void_percentage(void_percentage)),
        "40 gallons ≈ 3ft diameter".to_string(),
        "Bulb size based on grout volume".to_string(),
    ]
}
