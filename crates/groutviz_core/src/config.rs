//! View configuration.
//!
//! # Responsibility
//! - Hold plan/profile dimensions, marker size and the void percentage used
//!   by bulb sizing.
//! - Resolve overrides from environment variables.
//!
//! # Invariants
//! - `Default` reproduces the reference tool's layout exactly.
//! - Invalid overrides are ignored, never fatal.

use crate::engine::bulb::DEFAULT_VOID_PERCENTAGE;
use log::warn;

/// Environment variable overriding `void_percentage`.
pub const VOID_PERCENTAGE_ENV: &str = "GROUTVIZ_VOID_PERCENTAGE";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub plan_width: f64,
    pub plan_height: f64,
    pub profile_width: f64,
    pub profile_height: f64,
    /// Plan marker diameter in model units.
    pub point_size: f64,
    /// Percent, `> 0`.
    pub void_percentage: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            plan_width: 600.0,
            plan_height: 400.0,
            profile_width: 400.0,
            profile_height: 500.0,
            point_size: 15.0,
            void_percentage: DEFAULT_VOID_PERCENTAGE,
        }
    }
}

impl ViewConfig {
    /// Defaults with `GROUTVIZ_VOID_PERCENTAGE` applied when set and valid.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(VOID_PERCENTAGE_ENV) {
            match parse_void_percentage(raw.as_str()) {
                Some(value) => config.void_percentage = value,
                None => warn!(
                    "event=config_override module=config status=ignored key={} value={}",
                    VOID_PERCENTAGE_ENV,
                    raw.trim()
                ),
            }
        }
        config
    }

    pub fn with_void_percentage(mut self, void_percentage: f64) -> Self {
        if is_valid_void_percentage(void_percentage) {
            self.void_percentage = void_percentage;
        }
        self
    }
}

fn parse_void_percentage(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| is_valid_void_percentage(*value))
}

fn is_valid_void_percentage(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= 100.0
}
