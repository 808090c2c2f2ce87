//! Runtime configuration for embedding the notebook core.
//!
//! # Responsibility
//! - Describe where the database lives and how logging is set up.
//! - Load settings from serde sources or from `NOTEBOOK_*` variables.
//!
//! # Invariants
//! - `db_path = None` selects an in-memory database.
//! - `log_dir = None` leaves logging uninitialized; the `log` macros are
//!   then no-ops.

use crate::logging::{default_log_level, init_logging, LoggingError};
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "NOTEBOOK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEBOOK_LOG_DIR";

/// Notebook runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotebookConfig {
    /// SQLite file path; in-memory when absent.
    pub db_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl NotebookConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging was (or already is) active.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match self.log_dir.as_ref() {
            Some(dir) => {
                init_logging(self.log_level.as_str(), dir)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
