//! Card store schema: ordered upgrade steps and the readiness check.
//!
//! Step `n` (1-based) upgrades a store from version `n - 1` to `n`. The
//! applied version is stamped in `PRAGMA user_version`.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("sql/0001_kv_entries.sql")];

/// Tables every ready store carries.
const REQUIRED_TABLES: &[&str] = &["kv_entries"];

/// Schema version this build writes.
pub fn latest_schema_version() -> u32 {
    STEPS.len() as u32
}

/// Schema version stamped on `conn`; `0` for a blank database.
pub fn stored_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

/// Brings the store behind `conn` up to [`latest_schema_version`].
///
/// All pending steps run in one transaction.
pub(crate) fn upgrade(conn: &mut Connection, target: &str) -> DbResult<()> {
    let found = stored_schema_version(conn).map_err(|source| DbError::Open {
        target: target.to_string(),
        source,
    })?;
    let supported = latest_schema_version();

    if found > supported {
        return Err(DbError::SchemaTooNew {
            target: target.to_string(),
            found,
            supported,
        });
    }
    if found == supported {
        return Ok(());
    }

    let migrate_err = |version: u32| {
        move |source: rusqlite::Error| DbError::Migrate {
            target: target.to_string(),
            version,
            source,
        }
    };

    let tx = conn.transaction().map_err(migrate_err(found + 1))?;
    for (version, sql) in (found + 1..).zip(&STEPS[found as usize..]) {
        tx.execute_batch(sql)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(migrate_err(version))?;
    }
    tx.commit().map_err(migrate_err(supported))?;

    info!(
        "event=db_migrate module=db status=ok target={} from_version={} to_version={}",
        target, found, supported
    );
    Ok(())
}

/// Checks that `conn` was opened through [`super::open_db`] (or the in-memory
/// variant) by this build.
///
/// # Errors
/// - `DbError::SchemaNotReady` when the stamped version differs.
/// - `DbError::MissingTable` when the version matches but a table is absent.
pub fn ensure_ready(conn: &Connection) -> DbResult<()> {
    let found = stored_schema_version(conn)?;
    let expected = latest_schema_version();
    if found != expected {
        return Err(DbError::SchemaNotReady { found, expected });
    }

    for &table in REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(DbError::MissingTable(table));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_ready, latest_schema_version, stored_schema_version, upgrade};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn upgrade_stamps_latest_version_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        upgrade(&mut conn, ":memory:").unwrap();
        upgrade(&mut conn, ":memory:").unwrap();

        assert_eq!(stored_schema_version(&conn).unwrap(), latest_schema_version());
        ensure_ready(&conn).unwrap();
    }

    #[test]
    fn blank_connection_is_not_ready() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            ensure_ready(&conn),
            Err(DbError::SchemaNotReady { found: 0, .. })
        ));
    }
}
