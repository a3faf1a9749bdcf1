//! Connection bootstrap.
//!
//! # Invariants
//! - Returned connections are at [`super::latest_schema_version`].
//! - Every open attempt emits exactly one terminal `db_open` event.

use super::schema::upgrade;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const MEMORY_TARGET: &str = ":memory:";

/// Opens (or creates) a card store file and upgrades its schema.
///
/// Reopening the same file rehydrates every persisted key, including the
/// current session.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(&path.display().to_string(), || Connection::open(path))
}

/// Opens a throwaway in-memory card store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(MEMORY_TARGET, Connection::open_in_memory)
}

fn open_with<F>(target: &str, connect: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start target={target}");

    let result = connect()
        .and_then(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(conn)
        })
        .map_err(|source| DbError::Open {
            target: target.to_string(),
            source,
        })
        .and_then(|mut conn| upgrade(&mut conn, target).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok target={} duration_ms={}",
            target,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={} duration_ms={} error={}",
            target,
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
