//! Key/value repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/put/remove over the `kv_entries` table.
//! - Encode and decode JSON values for typed callers.
//!
//! # Invariants
//! - `put_raw` is a full replace (upsert) of one key.
//! - Construction rejects connections whose schema is not current.

use crate::db::{ensure_ready, DbError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for key/value persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted value under `key` is not valid JSON for the expected shape.
    InvalidData { key: String, message: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted value for `{key}`: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData { .. } => None,
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

/// Storage contract for opaque string values addressed by key.
pub trait KvRepository {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>>;
    fn put_raw(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Deletes `key`. Returns whether a value was present.
    fn remove(&self, key: &str) -> RepoResult<bool>;
}

impl<R: KvRepository + ?Sized> KvRepository for &R {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn put_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).put_raw(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        (**self).remove(key)
    }
}

/// Reads and decodes one JSON value.
pub fn read_json<T, R>(repo: &R, key: &str) -> RepoResult<Option<T>>
where
    T: DeserializeOwned,
    R: KvRepository + ?Sized,
{
    let Some(raw) = repo.get_raw(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| RepoError::InvalidData {
            key: key.to_string(),
            message: err.to_string(),
        })
}

/// Encodes and stores one JSON value, replacing any previous value.
pub fn write_json<T, R>(repo: &R, key: &str, value: &T) -> RepoResult<()>
where
    T: Serialize + ?Sized,
    R: KvRepository + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|err| RepoError::InvalidData {
        key: key.to_string(),
        message: err.to_string(),
    })?;
    repo.put_raw(key, &raw)
}

/// SQLite-backed key/value repository.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `RepoError::Db(DbError::SchemaNotReady)` for a connection that was
    ///   never upgraded.
    /// - `RepoError::Db(DbError::MissingTable)` when `kv_entries` is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_put module=repo status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}
