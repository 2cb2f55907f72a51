//! Catalog schema migrations.
//!
//! # Invariants
//! - Steps are listed in strictly increasing version order.
//! - All pending steps commit together or not at all.
//! - `user_version` is bumped inside the same transaction as each step.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

/// One schema step of the catalog database.
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "catalog",
        sql: include_str!("0001_catalog.sql"),
    },
    SchemaStep {
        version: 2,
        name: "teacher_uniqueness",
        sql: include_str!("0002_teacher_uniqueness.sql"),
    },
];

/// Schema version this binary reads and writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version stored on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Fails unless `conn` carries exactly the current catalog schema.
pub fn ensure_schema_current(conn: &Connection) -> DbResult<()> {
    let db_version = schema_version(conn)?;
    let latest = latest_version();
    if db_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: latest,
        });
    }
    if db_version < latest {
        return Err(DbError::SchemaBehind {
            db_version,
            expected: latest,
        });
    }
    Ok(())
}

/// Applies every step newer than the stored schema version.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` for schemas from a newer binary.
/// - `DbError::Migration` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = schema_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        if let Err(source) = run_step(&tx, step) {
            error!(
                "event=db_migrate module=db status=error version={} name={} error={}",
                step.version, step.name, source
            );
            return Err(DbError::Migration {
                version: step.version,
                source,
            });
        }
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, latest
    );
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> rusqlite::Result<()> {
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)
}
