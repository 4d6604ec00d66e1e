//! Core geometry/data engine for GroutViz.
//! This crate is the single source of truth for grouting-record rules.

pub mod config;
pub mod db;
pub mod engine;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use config::ViewConfig;
pub use engine::bulb::{bulb_radius, depth_to_px, DEFAULT_VOID_PERCENTAGE};
pub use engine::filter::{is_visible, visible_points, FilterSelection};
pub use engine::stats::{compute_stats, PointStats};
pub use engine::viewport::{project, unproject, DragState, Viewport};
pub use layout::plan::{hit_test, plan_grid, plan_markers, GridLine, PlanMarker};
pub use layout::profile::{profile_view, BulbGeometry, ProfileBody, ProfileView};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::classify::{category_color, classify, type_color, Category, Color, HoleType};
pub use model::geometry::Vec2;
pub use model::point::{Point, PointIssue, Severity, Stage};
pub use model::sample::sample_points;
pub use repo::point_repo::{
    PointRepository, RepoError, RepoResult, SqlitePointRepository, StaticPointRepository,
};
pub use service::ingest_service::{validate_records, IngestReport, IngestService, IssueReport};
pub use session::{SessionError, SessionId, ViewSession};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
