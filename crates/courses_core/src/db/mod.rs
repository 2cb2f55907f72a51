//! Catalog database bootstrap.
//!
//! # Responsibility
//! - Open SQLite connections with catalog pragmas applied.
//! - Bring the catalog schema to the version this binary expects.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Repositories only accept connections whose schema is exactly current.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the catalog database.
#[derive(Debug)]
pub enum DbError {
    /// Connection-level SQLite failure outside any migration.
    Sqlite(rusqlite::Error),
    /// Migration `version` failed; no pending migration was applied.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// Schema is older than this binary; the connection skipped `open_db`.
    SchemaBehind { db_version: u32, expected: u32 },
    /// Schema was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "catalog database error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "catalog migration {version} failed: {source}")
            }
            Self::SchemaBehind {
                db_version,
                expected,
            } => write!(
                f,
                "catalog schema version {db_version} is behind {expected}; open the database through db::open_db"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "catalog schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaBehind { .. } | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
