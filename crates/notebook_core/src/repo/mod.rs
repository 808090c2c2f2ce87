//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for notes and categories.
//! - Isolate SQLite query details from service orchestration.
//! - Run every multi-step write as one `IMMEDIATE` transaction.
//!
//! # Invariants
//! - Only `association_repo` writes the `note_categories` table.
//! - Repository APIs return semantic errors (`NoteNotFound`,
//!   `CategoryNotFound`, `DuplicateCategoryName`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::category::CategoryId;
use crate::model::note::NoteId;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod association_repo;
pub mod category_repo;
pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note/category persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Target category does not exist.
    CategoryNotFound(CategoryId),
    /// Another category already uses this (trimmed) name.
    DuplicateCategoryName(String),
    /// Required table is missing from the connection schema.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::DuplicateCategoryName(name) => {
                write!(f, "category name already in use: `{name}`")
            }
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
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

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

/// Verifies that `conn` carries the tables/columns a repository relies on.
pub(crate) fn ensure_schema(
    conn: &Connection,
    required: &[(&'static str, &[&'static str])],
) -> RepoResult<()> {
    for &(table, columns) in required {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }
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
