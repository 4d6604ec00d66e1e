//! Grout volume → bulb radius sizing for the profile view.
//!
//! # Responsibility
//! - Convert an injected grout quantity into a calibrated render radius.
//! - Place stage depths on the fixed 0–30 ft profile axis.
//!
//! # Invariants
//! - A 40-gallon stage always renders at `CALIBRATION_RADIUS_FEET *
//!   FEET_TO_PIXELS` (3 ft diameter), whatever the void percentage.
//! - Sizing is independent of plan-view zoom.
//! - Depths beyond `PROFILE_WINDOW_FEET` map past `profile_height`; they are
//!   not clamped.

use std::f64::consts::PI;

/// US gallon → cubic feet.
pub const GALLONS_TO_CUBIC_FEET: f64 = 0.134;
/// Assumed share of grout filling voids, in percent.
pub const DEFAULT_VOID_PERCENTAGE: f64 = 35.0;
/// Calibration anchor: this many gallons...
pub const CALIBRATION_GALLONS: f64 = 40.0;
/// ...render at this radius (40 gal ≈ 3 ft diameter).
pub const CALIBRATION_RADIUS_FEET: f64 = 1.5;
/// Profile-view pixels per foot of bulb radius.
pub const FEET_TO_PIXELS: f64 = 20.0;
/// Depth span shown by the profile axis.
pub const PROFILE_WINDOW_FEET: f64 = 30.0;

/// Radius in feet of a sphere holding `grout_gallons` at `void_percentage`.
///
/// Negative or non-finite grout counts as zero. An invalid void percentage
/// (non-finite or `<= 0`) falls back to `DEFAULT_VOID_PERCENTAGE`.
pub fn sphere_radius_feet(grout_gallons: f64, void_percentage: f64) -> f64 {
    let grout_gallons = if grout_gallons.is_finite() {
        grout_gallons.max(0.0)
    } else {
        0.0
    };
    let void_ratio = effective_void_percentage(void_percentage) / 100.0;

    let grout_cu_ft = grout_gallons * GALLONS_TO_CUBIC_FEET;
    let bulb_cu_ft = grout_cu_ft / void_ratio;
    (3.0 * bulb_cu_ft / (4.0 * PI)).cbrt()
}

/// Factor that makes a `CALIBRATION_GALLONS` bulb measure
/// `CALIBRATION_RADIUS_FEET`.
pub fn calibration_scale(void_percentage: f64) -> f64 {
    CALIBRATION_RADIUS_FEET / sphere_radius_feet(CALIBRATION_GALLONS, void_percentage)
}

/// Rendered bulb radius in profile pixels.
pub fn bulb_radius(grout_gallons: f64, void_percentage: f64) -> f64 {
    sphere_radius_feet(grout_gallons, void_percentage)
        * calibration_scale(void_percentage)
        * FEET_TO_PIXELS
}

/// Vertical pixel offset of `depth_feet` on a profile `profile_height` tall.
pub fn depth_to_px(depth_feet: f64, profile_height: f64) -> f64 {
    (depth_feet / PROFILE_WINDOW_FEET) * profile_height
}

/// Returns `void_percentage` when usable, else the design default.
pub fn effective_void_percentage(void_percentage: f64) -> f64 {
    if void_percentage.is_finite() && void_percentage > 0.0 {
        void_percentage
    } else {
        DEFAULT_VOID_PERCENTAGE
    }
}
