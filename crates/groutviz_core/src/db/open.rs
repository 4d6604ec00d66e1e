//! Read-only connection bootstrap for survey databases.
//!
//! # Invariants
//! - Returned connections are opened with `SQLITE_OPEN_READ_ONLY`.
//! - Returned connections carry exactly `SURVEY_SCHEMA_VERSION`.

use super::{DbError, DbResult, SURVEY_SCHEMA_VERSION};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a survey database file read-only and checks its schema version.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_survey_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=read_only");

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = match Connection::open_with_flags(path, flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match check_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=read_only duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_schema_rejected error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn check_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    let db_version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if db_version != SURVEY_SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            supported: SURVEY_SCHEMA_VERSION,
        });
    }
    Ok(())
}
