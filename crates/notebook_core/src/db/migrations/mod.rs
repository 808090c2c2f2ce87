//! Notebook schema history.
//!
//! # Responsibility
//! - v1 creates `categories` and `notes`; v2 adds the `note_categories`
//!   link table.
//! - Bring an older notebook file up to the latest version in one step.
//!
//! # Invariants
//! - Versions increase by position in `MIGRATIONS`.
//! - `PRAGMA user_version` equals the last applied version.
//! - Files from a newer build are refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "note_categories",
        sql: include_str!("0002_note_categories.sql"),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Upgrades `conn` to `latest_version()`; a no-op on an up-to-date file.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer
///   binary.
/// - `DbError::Sqlite` when any migration statement fails; nothing is applied
///   in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    let pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current_version);
    for migration in pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}
