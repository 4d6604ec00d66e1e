//! Read-only access to field survey databases.
//!
//! # Responsibility
//! - Open survey SQLite files without write access.
//! - Reject files whose schema version this binary does not understand.
//!
//! # Invariants
//! - Core never writes to a survey database.
//! - Schema version is tracked via `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::open_survey_db;

/// Schema expected in survey databases, for producers and test fixtures.
pub const SURVEY_SCHEMA_SQL: &str = include_str!("survey_schema.sql");
/// `user_version` written by `SURVEY_SCHEMA_SQL`.
pub const SURVEY_SCHEMA_VERSION: u32 = 1;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion { db_version: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                supported,
            } => write!(
                f,
                "survey schema version {db_version} is not supported (expected {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
