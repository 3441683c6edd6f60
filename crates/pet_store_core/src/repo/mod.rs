//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts (find, save, delete).
//! - Isolate SQLite query details from reconciliation logic.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Repositories never open transactions; callers own the transaction scope
//!   and hand repositories a connection or transaction to run against.

use crate::db::migrations::latest_version;
use crate::db::{ensure_foreign_keys, DbError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod customer_repo;
pub mod employee_repo;
pub mod pet_store_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Row with the given id does not exist in `table`.
    NotFound { table: &'static str, id: i64 },
    /// Write or delete was requested for an entity that was never saved.
    MissingIdentity(&'static str),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted into an entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{table} not found: {id}"),
            Self::MissingIdentity(table) => write!(f, "{table} has no id; save it first"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "pet store repositories require schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "pet store repositories require table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "pet store repositories require column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "pet_store",
        &[
            "pet_store_id",
            "pet_store_name",
            "pet_store_address",
            "pet_store_city",
            "pet_store_state",
            "pet_store_zip",
            "pet_store_phone",
        ],
    ),
    (
        "employee",
        &[
            "employee_id",
            "pet_store_id",
            "employee_first_name",
            "employee_last_name",
            "employee_phone_number",
            "employee_job_title",
        ],
    ),
    (
        "customer",
        &[
            "customer_id",
            "customer_first_name",
            "customer_last_name",
            "customer_email",
        ],
    ),
    ("pet_store_customer", &["pet_store_id", "customer_id"]),
];

/// Verifies that `conn` is migrated, carries every table and column the
/// repositories query, and enforces foreign keys.
pub fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    ensure_foreign_keys(conn)?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
