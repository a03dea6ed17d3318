//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register built-in table migrations in strictly increasing order.
//! - Upgrade older stores to the declared schema version atomically, calling
//!   the configured migration hook on the way.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - The declared version is mirrored to `PRAGMA user_version` only after the
//!   hook succeeded, in the same transaction.
//! - The version is re-read under the write lock; concurrent openers of one
//!   store upgrade it once.
//! - The hook only runs for stores that already existed (`user_version > 0`).

use crate::db::{DbError, DbResult, StoreConfiguration};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_tasks.sql"),
}];

/// Returns the latest built-in migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection up to `config.schema_version`.
///
/// Built-in table migrations newer than the on-disk version run first, then
/// `config.migration` is invoked with the on-disk version. Fresh stores are
/// created without calling the hook. Stores already at the declared version
/// are left untouched.
pub fn apply_migrations(conn: &mut Connection, config: &StoreConfiguration) -> DbResult<()> {
    let declared = config.schema_version;
    let minimum = latest_version();
    if declared < minimum {
        return Err(DbError::InvalidSchemaVersion { declared, minimum });
    }

    if check_version(current_user_version(conn)?, declared)? {
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    // Another connection may have finished the upgrade while we waited.
    let current_version = current_user_version(&tx)?;
    if check_version(current_version, declared)? {
        return Ok(());
    }

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }
        tx.execute_batch(migration.sql)?;
    }
    if current_version > 0 {
        (config.migration)(&tx, current_version)?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {declared};"))?;
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current_version, declared
    );
    Ok(())
}

/// Returns `true` when the store is already at `declared`.
fn check_version(current_version: u32, declared: u32) -> DbResult<bool> {
    if current_version > declared {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: declared,
        });
    }
    Ok(current_version == declared)
}

/// Reads the schema version stored in the database header.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
