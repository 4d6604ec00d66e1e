//! Point record sources.
//!
//! # Responsibility
//! - Provide a stable read API over wherever grout records come from.
//! - Keep SQL details inside the core storage boundary.
//!
//! # Invariants
//! - Repositories only read; no implementation writes records back.
//! - Rows are returned as stored; record-level checks belong to ingestion.
//! - Records are returned in source order (insertion order for SQLite).

use crate::db::DbError;
use crate::model::classify::Category;
use crate::model::geometry::Vec2;
use crate::model::point::{Point, Stage};
use log::warn;
use rusqlite::{Connection, Row};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const POINT_SELECT_SQL: &str = "SELECT
    id,
    x,
    y,
    total_depth,
    total_grout,
    elevation_at_bottom,
    install_date,
    category
FROM points
ORDER BY rowid ASC;";

const STAGE_SELECT_SQL: &str = "SELECT
    point_id,
    depth,
    grout_amount
FROM stages
ORDER BY point_id ASC, seq ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for record loading.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-only source of grout point records.
pub trait PointRepository {
    /// Short source name used in log events.
    fn source_name(&self) -> &'static str;
    fn load_points(&self) -> RepoResult<Vec<Point>>;
}

impl<R: PointRepository + ?Sized> PointRepository for &R {
    fn source_name(&self) -> &'static str {
        (**self).source_name()
    }

    fn load_points(&self) -> RepoResult<Vec<Point>> {
        (**self).load_points()
    }
}

/// In-memory record set, e.g. the bundled sample data.
#[derive(Debug, Clone, Default)]
pub struct StaticPointRepository {
    points: Vec<Point>,
}

impl StaticPointRepository {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl PointRepository for StaticPointRepository {
    fn source_name(&self) -> &'static str {
        "static"
    }

    fn load_points(&self) -> RepoResult<Vec<Point>> {
        Ok(self.points.clone())
    }
}

/// Survey-database-backed repository.
pub struct SqlitePointRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePointRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_stages(&self) -> RepoResult<HashMap<String, Vec<Stage>>> {
        let mut stmt = self.conn.prepare(STAGE_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut stages: HashMap<String, Vec<Stage>> = HashMap::new();

        while let Some(row) = rows.next()? {
            let point_id: String = row.get("point_id")?;
            let stage = Stage::new(row.get("depth")?, row.get("grout_amount")?);
            stages.entry(point_id).or_default().push(stage);
        }

        Ok(stages)
    }
}

impl PointRepository for SqlitePointRepository<'_> {
    fn source_name(&self) -> &'static str {
        "sqlite"
    }

    fn load_points(&self) -> RepoResult<Vec<Point>> {
        let mut stages = self.load_stages()?;
        let mut stmt = self.conn.prepare(POINT_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut points = Vec::new();

        while let Some(row) = rows.next()? {
            let mut point = parse_point_row(row)?;
            point.stages = stages.remove(point.id.as_str()).unwrap_or_default();
            points.push(point);
        }

        if !stages.is_empty() {
            warn!(
                "event=survey_load module=repo status=orphan_stages point_ids={}",
                stages.keys().cloned().collect::<Vec<_>>().join(",")
            );
        }

        Ok(points)
    }
}

fn parse_point_row(row: &Row<'_>) -> RepoResult<Point> {
    let id: String = row.get("id")?;
    let category_text: String = row.get("category")?;
    let date = row
        .get::<_, Option<String>>("install_date")?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let mut point = Point::new(
        id,
        Vec2::new(row.get("x")?, row.get("y")?),
        Category::from_label(&category_text),
    );
    point.total_depth = row.get("total_depth")?;
    point.total_grout = row.get("total_grout")?;
    point.elevation_at_bottom = row.get("elevation_at_bottom")?;
    point.date = date;
    Ok(point)
}
