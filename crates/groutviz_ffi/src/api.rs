//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose plan/profile session operations to Dart via FRB.
//! - Flatten core render geometry into plain DTOs the UI can draw directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Session handles are UUID strings issued by `session_open_*`.
//! - Every failure is reported through a response envelope (`ok` + `message`).

use groutviz_core::db::open_survey_db;
use groutviz_core::layout::profile::ProfileBody;
use groutviz_core::{
    bulb_radius, classify, core_version as core_version_inner,
    init_logging as init_logging_inner, ping as ping_inner, sample_points, Category, HoleType,
    IngestService, IssueReport, PlanMarker, PointRepository, PointStats, ProfileView, SessionId,
    SqlitePointRepository, StaticPointRepository, Vec2, ViewConfig, ViewSession,
};
use log::{info, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use uuid::Uuid;

const SURVEY_DB_ENV: &str = "GROUTVIZ_SURVEY_DB";
static SESSIONS: OnceLock<Mutex<HashMap<SessionId, ViewSession>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Hole type label for a point id (`Unknown` when no prefix matches).
#[flutter_rust_bridge::frb(sync)]
pub fn classify_hole(point_id: String) -> String {
    classify(point_id.as_str()).label().to_string()
}

/// Rendered bulb radius in profile pixels.
///
/// `void_percentage = None` uses the configured default.
#[flutter_rust_bridge::frb(sync)]
pub fn bulb_radius_px(grout_gallons: f64, void_percentage: Option<f64>) -> f64 {
    let config = match void_percentage {
        Some(value) => ViewConfig::from_env().with_void_percentage(value),
        None => ViewConfig::from_env(),
    };
    bulb_radius(grout_gallons, config.void_percentage)
}

/// Response envelope for session creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOpenResponse {
    /// Whether a session was opened.
    pub ok: bool,
    /// Handle for later `session_*` calls.
    pub session_id: Option<String>,
    /// Accepted record count.
    pub point_count: u32,
    /// One line per ingestion issue, `<point_id>: <issue>`.
    pub issues: Vec<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl SessionOpenResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            session_id: None,
            point_count: 0,
            issues: Vec::new(),
            message: message.into(),
        }
    }
}

/// Generic action response envelope for session input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionActionResponse {
    /// Whether the event was applied.
    pub ok: bool,
    /// Selected point id after the event, when any.
    pub point_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl SessionActionResponse {
    fn success(message: impl Into<String>, point_id: Option<String>) -> Self {
        Self {
            ok: true,
            point_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            point_id: None,
            message: message.into(),
        }
    }
}

/// Statistics panel values.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub count: u32,
    pub total_grout: f64,
    pub avg_depth: f64,
    pub avg_grout: f64,
    /// Display rows as `<label>: <value>`.
    pub lines: Vec<String>,
}

/// One plan marker in model units.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: String,
    pub hole_type: String,
    pub left: f64,
    pub top: f64,
    pub size: f64,
    pub fill: String,
    pub opacity: f64,
    pub highlighted: bool,
    pub selected: bool,
    pub dashed_border: bool,
    pub elevation_label: Option<String>,
}

/// One stage bulb in profile pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BulbView {
    pub stage_index: u32,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub fill: String,
    pub depth_text: String,
    pub grout_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTickView {
    pub y: f64,
    pub label: String,
}

/// Profile panel of the selected point.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub point_id: String,
    pub title: String,
    pub scale: Vec<ScaleTickView>,
    /// Hole bar height in pixels; `None` for points without installation data.
    pub hole_height: Option<f64>,
    pub bottom_text: Option<String>,
    pub no_data_message: Option<String>,
    pub bulbs: Vec<BulbView>,
    pub details: Vec<String>,
    pub legend: Vec<String>,
}

/// Full render state of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub session_id: String,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom_label: String,
    pub css_transform: String,
    pub dragging: bool,
    pub selected_types: Vec<String>,
    pub selected_categories: Vec<String>,
    pub stats: StatsView,
    pub markers: Vec<MarkerView>,
    pub profile: Option<ProfileSnapshot>,
}

/// Snapshot response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotResponse {
    pub ok: bool,
    pub snapshot: Option<ViewSnapshot>,
    pub message: String,
}

/// Opens a session over the bundled reference records.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open_sample() -> SessionOpenResponse {
    open_session_from(&StaticPointRepository::new(sample_points()))
}

/// Opens a session over a survey database.
///
/// Input semantics:
/// - `db_path`: survey file path; when absent or blank, `GROUTVIZ_SURVEY_DB`.
///
/// # FFI contract
/// - Sync call, DB-backed execution (read-only).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open_survey(db_path: Option<String>) -> SessionOpenResponse {
    let Some(path) = resolve_survey_db_path(db_path) else {
        return SessionOpenResponse::failure(format!(
            "session_open_survey failed: no db_path given and {SURVEY_DB_ENV} is not set"
        ));
    };
    let conn = match open_survey_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            return SessionOpenResponse::failure(format!("session_open_survey failed: {err}"))
        }
    };
    open_session_from(&SqlitePointRepository::new(&conn))
}

/// Drops a session. Closing an unknown handle is reported, not fatal.
#[flutter_rust_bridge::frb(sync)]
pub fn session_close(session_id: String) -> SessionActionResponse {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(message) => return SessionActionResponse::failure(message),
    };
    match lock_sessions().remove(&id) {
        Some(_) => {
            info!(
                "event=session_close module=ffi status=ok session_id={}",
                id
            );
            SessionActionResponse::success("Session closed.", None)
        }
        None => SessionActionResponse::failure(format!("session not found: {id}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_pointer_down(session_id: String, x: f64, y: f64) -> SessionActionResponse {
    session_action(&session_id, "session_pointer_down", |session| {
        session.pointer_down(Vec2::new(x, y));
        Ok("Drag started.".to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_pointer_move(session_id: String, x: f64, y: f64) -> SessionActionResponse {
    session_action(&session_id, "session_pointer_move", |session| {
        Ok(if session.pointer_move(Vec2::new(x, y)) {
            "Panned.".to_string()
        } else {
            "No change.".to_string()
        })
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_pointer_up(session_id: String) -> SessionActionResponse {
    session_action(&session_id, "session_pointer_up", |session| {
        session.pointer_up();
        Ok("Drag ended.".to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_pointer_leave(session_id: String) -> SessionActionResponse {
    session_action(&session_id, "session_pointer_leave", |session| {
        session.pointer_leave();
        Ok("Drag ended.".to_string())
    })
}

/// Applies one wheel event; positive `delta_y` zooms out.
#[flutter_rust_bridge::frb(sync)]
pub fn session_wheel(session_id: String, delta_y: f64) -> SessionActionResponse {
    session_action(&session_id, "session_wheel", |session| {
        session.wheel(delta_y);
        Ok(session.viewport().zoom_label())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_zoom_in(session_id: String) -> SessionActionResponse {
    session_action(&session_id, "session_zoom_in", |session| {
        session.zoom_in();
        Ok(session.viewport().zoom_label())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_zoom_out(session_id: String) -> SessionActionResponse {
    session_action(&session_id, "session_zoom_out", |session| {
        session.zoom_out();
        Ok(session.viewport().zoom_label())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_reset_view(session_id: String) -> SessionActionResponse {
    session_action(&session_id, "session_reset_view", |session| {
        session.reset_view();
        Ok(session.viewport().zoom_label())
    })
}

/// Toggles a hole-type filter by display label (e.g. `Primary Shoring`).
#[flutter_rust_bridge::frb(sync)]
pub fn session_toggle_type(session_id: String, hole_type: String) -> SessionActionResponse {
    session_action(&session_id, "session_toggle_type", |session| {
        let kind = HoleType::from_label(hole_type.trim());
        if kind == HoleType::Unknown {
            return Err(format!("unknown hole type: {}", hole_type.trim()));
        }
        Ok(toggle_message(kind.label(), session.toggle_type(kind)))
    })
}

/// Toggles a category filter by display label.
///
/// Labels outside the known set are accepted so stored custom statuses can
/// still be filtered.
#[flutter_rust_bridge::frb(sync)]
pub fn session_toggle_category(session_id: String, category: String) -> SessionActionResponse {
    session_action(&session_id, "session_toggle_category", |session| {
        let category = Category::from_label(category.as_str());
        if category.label().is_empty() {
            return Err("category label cannot be empty".to_string());
        }
        let label = category.label().to_string();
        Ok(toggle_message(&label, session.toggle_category(category)))
    })
}

/// Hit-tests a click at screen position (`x`, `y`) and selects the point under it.
#[flutter_rust_bridge::frb(sync)]
pub fn session_click(session_id: String, x: f64, y: f64) -> SessionActionResponse {
    session_action(&session_id, "session_click", |session| {
        Ok(match session.click(Vec2::new(x, y)) {
            Some(point_id) => format!("Selected {point_id}."),
            None => "No point at position.".to_string(),
        })
    })
}

/// Selects a point by id.
#[flutter_rust_bridge::frb(sync)]
pub fn session_select(session_id: String, point_id: String) -> SessionActionResponse {
    session_action(&session_id, "session_select", |session| {
        session
            .select_point(point_id.trim())
            .map(|point| format!("Selected {}.", point.id))
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_deselect(session_id: String) -> SessionActionResponse {
    session_action(&session_id, "session_deselect", |session| {
        session.deselect();
        Ok("Selection cleared.".to_string())
    })
}

/// Returns the full render state of a session.
///
/// # FFI contract
/// - Sync call, recomputes every derived view.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_snapshot(session_id: String) -> SnapshotResponse {
    match with_session(&session_id, |session| Ok(to_snapshot(session))) {
        Ok(snapshot) => SnapshotResponse {
            ok: true,
            snapshot: Some(snapshot),
            message: String::new(),
        },
        Err(err) => SnapshotResponse {
            ok: false,
            snapshot: None,
            message: format!("session_snapshot failed: {err}"),
        },
    }
}

fn open_session_from(repo: &impl PointRepository) -> SessionOpenResponse {
    let service = IngestService::new(repo);
    let (session, issues) = match service.open_session(ViewConfig::from_env()) {
        Ok(opened) => opened,
        Err(err) => return SessionOpenResponse::failure(format!("session_open failed: {err}")),
    };

    let id = session.id();
    let point_count = session.points().len() as u32;
    lock_sessions().insert(id, session);
    info!(
        "event=session_open module=ffi status=ok source={} session_id={} point_count={} issues={}",
        repo.source_name(),
        id,
        point_count,
        issues.len()
    );

    SessionOpenResponse {
        ok: true,
        session_id: Some(id.to_string()),
        point_count,
        issues: issues.iter().map(issue_line).collect(),
        message: format!("Loaded {point_count} point(s)."),
    }
}

fn session_action(
    session_id: &str,
    operation: &str,
    f: impl FnOnce(&mut ViewSession) -> Result<String, String>,
) -> SessionActionResponse {
    match with_session(session_id, |session| {
        let message = f(session)?;
        let selected = session.selected_point().map(|point| point.id.clone());
        Ok((message, selected))
    }) {
        Ok((message, selected)) => SessionActionResponse::success(message, selected),
        Err(err) => SessionActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn with_session<T>(
    session_id: &str,
    f: impl FnOnce(&mut ViewSession) -> Result<T, String>,
) -> Result<T, String> {
    let id = parse_session_id(session_id)?;
    let mut sessions = lock_sessions();
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| format!("session not found: {id}"))?;
    f(session)
}

fn lock_sessions() -> MutexGuard<'static, HashMap<SessionId, ViewSession>> {
    SESSIONS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| {
            warn!("event=session_registry module=ffi status=recovered reason=poisoned_lock");
            PoisonError::into_inner(poisoned)
        })
}

fn parse_session_id(raw: &str) -> Result<SessionId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid session id: `{}`", raw.trim()))
}

fn resolve_survey_db_path(db_path: Option<String>) -> Option<PathBuf> {
    let explicit = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty());
    if let Some(value) = explicit {
        return Some(PathBuf::from(value));
    }
    std::env::var(SURVEY_DB_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn issue_line(report: &IssueReport) -> String {
    format!("{}: {}", report.point_id, report.issue)
}

fn toggle_message(label: &str, selected: bool) -> String {
    if selected {
        format!("Filter on: {label}.")
    } else {
        format!("Filter off: {label}.")
    }
}

fn to_snapshot(session: &ViewSession) -> ViewSnapshot {
    let viewport = session.viewport();
    ViewSnapshot {
        session_id: session.id().to_string(),
        zoom: viewport.zoom(),
        pan_x: viewport.pan().x,
        pan_y: viewport.pan().y,
        zoom_label: viewport.zoom_label(),
        css_transform: viewport.css_transform(),
        dragging: viewport.is_dragging(),
        selected_types: session
            .filter()
            .selected_types()
            .iter()
            .map(|kind| kind.label().to_string())
            .collect(),
        selected_categories: session
            .filter()
            .selected_categories()
            .iter()
            .map(|category| category.label().to_string())
            .collect(),
        stats: to_stats_view(&session.stats()),
        markers: session.plan_markers().into_iter().map(to_marker_view).collect(),
        profile: session.profile().map(to_profile_snapshot),
    }
}

fn to_stats_view(stats: &PointStats) -> StatsView {
    StatsView {
        count: stats.count as u32,
        total_grout: stats.total_grout,
        avg_depth: stats.avg_depth,
        avg_grout: stats.avg_grout,
        lines: stats
            .summary_lines()
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect(),
    }
}

fn to_marker_view(marker: PlanMarker) -> MarkerView {
    MarkerView {
        hole_type: marker.hole_type.label().to_string(),
        left: marker.origin.x,
        top: marker.origin.y,
        size: marker.size,
        fill: marker.fill.as_hex().to_string(),
        opacity: marker.opacity,
        highlighted: marker.highlighted,
        selected: marker.selected,
        dashed_border: marker.dashed_border,
        elevation_label: marker.elevation_label,
        id: marker.id,
    }
}

fn to_profile_snapshot(view: ProfileView) -> ProfileSnapshot {
    let bulbs = view
        .bulbs()
        .iter()
        .map(|bulb| BulbView {
            stage_index: bulb.stage_index as u32,
            center_x: bulb.center.x,
            center_y: bulb.center.y,
            radius: bulb.radius,
            fill: bulb.fill.as_hex().to_string(),
            depth_text: bulb.label.depth_text.clone(),
            grout_text: bulb.label.grout_text.clone(),
        })
        .collect();
    let (hole_height, bottom_text, no_data_message) = match view.body {
        ProfileBody::Installed { hole, bottom, .. } => (Some(hole.height), Some(bottom.text), None),
        ProfileBody::NoData { message } => (None, None, Some(message)),
    };

    ProfileSnapshot {
        point_id: view.point_id,
        title: view.title,
        scale: view
            .scale
            .into_iter()
            .map(|tick| ScaleTickView {
                y: tick.y,
                label: tick.label,
            })
            .collect(),
        hole_height,
        bottom_text,
        no_data_message,
        bulbs,
        details: view.details,
        legend: view.legend,
    }
}
