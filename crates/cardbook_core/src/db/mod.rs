//! SQLite substrate of the card store.
//!
//! `open_db`/`open_db_in_memory` hand out connections whose schema is
//! current; `schema::ensure_ready` lets repositories refuse anything else.
//! Errors name the store they came from so the CLI can report the path.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_ready, latest_schema_version, stored_schema_version};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The store at `target` could not be opened or configured.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Upgrade step `version` failed on `target`; no step was kept.
    Migrate {
        target: String,
        version: u32,
        source: rusqlite::Error,
    },
    /// `target` was written by a newer build.
    SchemaTooNew {
        target: String,
        found: u32,
        supported: u32,
    },
    /// Connection was not upgraded to this build's schema.
    SchemaNotReady { found: u32, expected: u32 },
    MissingTable(&'static str),
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open card store `{target}`: {source}")
            }
            Self::Migrate {
                target,
                version,
                source,
            } => write!(
                f,
                "cannot upgrade card store `{target}` to schema {version}: {source}"
            ),
            Self::SchemaTooNew {
                target,
                found,
                supported,
            } => write!(
                f,
                "card store `{target}` uses schema {found}; this build reads up to {supported}"
            ),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "connection is at schema {found}, expected {expected}; open it with open_db"
            ),
            Self::MissingTable(table) => write!(f, "required table `{table}` is missing"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migrate { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::SchemaNotReady { .. } | Self::MissingTable(_) => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
