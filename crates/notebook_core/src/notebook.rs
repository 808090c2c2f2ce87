//! Operation facade consumed by boundary layers (HTTP, CLI).
//!
//! # Responsibility
//! - Own one migrated SQLite connection.
//! - Expose every note/category use-case as a single blocking call.
//!
//! # Invariants
//! - The schema is checked once when the notebook is built; per-call
//!   repositories reuse that result.
//! - The connection never leaves the facade, so association rows are only
//!   written through the repositories.
//! - Notes crossing this boundary always carry their categories inline.

use crate::config::NotebookConfig;
use crate::db::{open_db, open_db_in_memory};
use crate::model::category::{Category, CategoryId};
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::repo::category_repo::{self, SqliteCategoryRepository};
use crate::repo::ensure_schema;
use crate::repo::note_repo::{self, NoteListQuery, SqliteNoteRepository};
use crate::service::category_service::CategoryService;
use crate::service::error::{ErrorKind, ServiceResult};
use crate::service::note_service::NoteService;
use log::{error, warn};
use rusqlite::Connection;
use std::path::Path;

/// Single-user notebook backed by SQLite.
pub struct Notebook {
    conn: Connection,
}

impl Notebook {
    /// Opens (or creates) a notebook database file.
    pub fn open(path: impl AsRef<Path>) -> ServiceResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a throwaway in-memory notebook.
    pub fn open_in_memory() -> ServiceResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Opens the database selected by `config.db_path`.
    pub fn open_with_config(config: &NotebookConfig) -> ServiceResult<Self> {
        match config.db_path.as_ref() {
            Some(path) => Self::open(path),
            None => Self::open_in_memory(),
        }
    }

    /// Wraps an already migrated connection after checking its schema.
    pub fn from_connection(conn: Connection) -> ServiceResult<Self> {
        ensure_schema(&conn, category_repo::REQUIRED_SCHEMA)?;
        ensure_schema(&conn, note_repo::REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }

    fn categories(&mut self) -> CategoryService<SqliteCategoryRepository<'_>> {
        CategoryService::new(SqliteCategoryRepository::from_checked(&mut self.conn))
    }

    fn notes(&mut self) -> NoteService<SqliteNoteRepository<'_>> {
        NoteService::new(SqliteNoteRepository::from_checked(&mut self.conn))
    }

    pub fn create_category(&mut self, name: &str) -> ServiceResult<Category> {
        log_failure("create_category", self.categories().create_category(name))
    }

    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> ServiceResult<Category> {
        log_failure(
            "rename_category",
            self.categories().rename_category(id, name),
        )
    }

    pub fn list_categories(&mut self) -> ServiceResult<Vec<Category>> {
        log_failure("list_categories", self.categories().list_categories())
    }

    pub fn get_category(&mut self, id: CategoryId) -> ServiceResult<Category> {
        log_failure("get_category", self.categories().get_category(id))
    }

    pub fn find_category_by_name(&mut self, name: &str) -> ServiceResult<Option<Category>> {
        log_failure(
            "find_category_by_name",
            self.categories().find_category_by_name(name),
        )
    }

    pub fn delete_category(&mut self, id: CategoryId) -> ServiceResult<()> {
        log_failure("delete_category", self.categories().delete_category(id))
    }

    pub fn create_note(&mut self, note: NewNote) -> ServiceResult<Note> {
        log_failure("create_note", self.notes().create_note(note))
    }

    pub fn list_notes(&mut self, query: NoteListQuery) -> ServiceResult<Vec<Note>> {
        log_failure("list_notes", self.notes().list_notes(query))
    }

    pub fn get_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        log_failure("get_note", self.notes().get_note(id))
    }

    pub fn update_note(&mut self, id: NoteId, patch: NotePatch) -> ServiceResult<Note> {
        log_failure("update_note", self.notes().update_note(id, patch))
    }

    pub fn set_archived(&mut self, id: NoteId, archived: bool) -> ServiceResult<Note> {
        log_failure("set_archived", self.notes().set_archived(id, archived))
    }

    pub fn archive_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        log_failure("archive_note", self.notes().archive_note(id))
    }

    pub fn unarchive_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        log_failure("unarchive_note", self.notes().unarchive_note(id))
    }

    pub fn delete_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        log_failure("delete_note", self.notes().delete_note(id))
    }

    pub fn set_note_categories(
        &mut self,
        id: NoteId,
        category_ids: &[CategoryId],
    ) -> ServiceResult<Note> {
        log_failure(
            "set_note_categories",
            self.notes().set_note_categories(id, category_ids),
        )
    }
}

fn log_failure<T>(operation: &str, result: ServiceResult<T>) -> ServiceResult<T> {
    if let Err(err) = &result {
        let kind = err.kind();
        if kind == ErrorKind::Internal {
            error!(
                "event=operation module=notebook status=error op={operation} error_kind={} error={err}",
                kind.as_str()
            );
        } else {
            warn!(
                "event=operation module=notebook status=rejected op={operation} error_kind={}",
                kind.as_str()
            );
        }
    }
    result
}
