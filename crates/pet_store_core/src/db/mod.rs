//! Pet store database bootstrap.
//!
//! # Responsibility
//! - Hand out SQLite connections that enforce the store/employee/customer
//!   relationships: foreign keys on, schema at the latest version.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection without foreign-key enforcement is never handed out, since
//!   store deletion cascades through `ON DELETE CASCADE`.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening, configuring or migrating the pet store database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Migration `version` failed; the whole batch was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// On-disk schema was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// `PRAGMA foreign_keys` reads back as off.
    ForeignKeysDisabled,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Migration { version, source } => {
                write!(f, "pet store migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "pet store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::ForeignKeysDisabled => write!(
                f,
                "foreign key enforcement is off; store deletes would leave orphaned employees"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::ForeignKeysDisabled => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Fails with `ForeignKeysDisabled` unless `conn` enforces foreign keys.
pub fn ensure_foreign_keys(conn: &Connection) -> DbResult<()> {
    let enabled: bool = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if enabled {
        Ok(())
    } else {
        Err(DbError::ForeignKeysDisabled)
    }
}
