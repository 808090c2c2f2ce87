//! Core domain logic for the notebook: notes, categories and the links
//! between them.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notebook;
pub mod repo;
pub mod service;

pub use config::NotebookConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{normalize_category_name, Category, CategoryId};
pub use model::note::{NewNote, Note, NoteId, NotePatch};
pub use model::validation::ValidationError;
pub use notebook::Notebook;
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::note_repo::{NoteListQuery, NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::error::{EntityRef, ErrorKind, ServiceError, ServiceResult};
pub use service::note_service::NoteService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
