//! Notebook database files: opening, pragmas and schema upgrades.
//!
//! # Responsibility
//! - Hand out connections that already carry the notes, categories and
//!   note/category link tables.
//! - Report store-level failures (`DbError`) that repositories wrap.
//!
//! # Invariants
//! - A connection is returned only after every pending migration committed.
//! - `foreign_keys` is on for every returned connection, so a link row can
//!   never point at a deleted note or category.
//! - A category name clash detected by SQLite is recognizable through
//!   `DbError::is_unique_violation`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure raised by the notebook store itself.
#[derive(Debug)]
pub enum DbError {
    /// Statement, pragma or constraint failure reported by SQLite.
    Sqlite(rusqlite::Error),
    /// The file was upgraded by a newer notebook build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns whether this error is a SQLite UNIQUE/PRIMARY KEY violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(code, message)) => {
                code.code == rusqlite::ErrorCode::ConstraintViolation
                    && (code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                        || message.as_deref().is_some_and(|value| {
                            value.contains("UNIQUE constraint failed")
                        }))
            }
            _ => false,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "notebook schema v{db_version} was written by a newer build (this build knows up to v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
