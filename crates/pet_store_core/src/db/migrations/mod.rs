//! Versioned schema for stores, employees, customers and their links.
//!
//! # Invariants
//! - Versions are strictly increasing; the newest one is mirrored to
//!   `PRAGMA user_version`.
//! - Pending steps run in one transaction: a failing step leaves the database
//!   at its previous version and reports which step failed.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the schema version this build writes and expects.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this build.
/// - `Migration` with the failing step's version; nothing is applied then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    upgrade(conn, SCHEMA_STEPS)
}

fn upgrade(conn: &mut Connection, steps: &[SchemaStep]) -> DbResult<()> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let target = steps.last().map_or(0, |step| step.version);

    if from_version > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: target,
        });
    }

    let first_pending = steps.partition_point(|step| step.version <= from_version);
    let pending = &steps[first_pending..];
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skipped version={from_version}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        run_step(&tx, step)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={target} steps={}",
        pending.len()
    );
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    tx.execute_batch(step.sql)
        .and_then(|()| tx.pragma_update(None, "user_version", step.version))
        .map_err(|source| DbError::Migration {
            version: step.version,
            source,
        })
}
