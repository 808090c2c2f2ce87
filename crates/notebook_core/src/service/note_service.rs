//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/list/get/update/archive/delete APIs.
//! - Replace a note's category set in full.
//!
//! # Invariants
//! - Archiving is idempotent; any flag transition is allowed.
//! - `set_note_categories` fails only when the note is missing; unknown
//!   category ids are dropped.
//! - Note list is always sorted by `created_at DESC, id DESC`.

use crate::model::category::CategoryId;
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::repo::note_repo::{NoteListQuery, NoteRepository};
use crate::service::error::{EntityRef, ServiceError, ServiceResult};

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note with no categories.
    pub fn create_note(&mut self, note: NewNote) -> ServiceResult<Note> {
        note.validate()?;
        Ok(self.repo.create_note(&note)?)
    }

    /// Lists notes matching the optional archive/category filters.
    pub fn list_notes(&self, query: NoteListQuery) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.list_notes(&query)?)
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: NoteId) -> ServiceResult<Note> {
        self.repo
            .get_note(id)?
            .ok_or(ServiceError::NotFound(EntityRef::Note(id)))
    }

    /// Applies a partial update; omitted fields stay unchanged.
    pub fn update_note(&mut self, id: NoteId, patch: NotePatch) -> ServiceResult<Note> {
        patch.validate()?;
        Ok(self.repo.update_note(id, &patch)?)
    }

    /// Sets the archive flag only.
    pub fn set_archived(&mut self, id: NoteId, archived: bool) -> ServiceResult<Note> {
        self.update_note(id, NotePatch::archived(archived))
    }

    pub fn archive_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        self.set_archived(id, true)
    }

    pub fn unarchive_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        self.set_archived(id, false)
    }

    /// Deletes a note with its associations and returns its last state.
    pub fn delete_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        Ok(self.repo.delete_note(id)?)
    }

    /// Replaces the note's category set with `category_ids`.
    pub fn set_note_categories(
        &mut self,
        id: NoteId,
        category_ids: &[CategoryId],
    ) -> ServiceResult<Note> {
        Ok(self.repo.set_note_categories(id, category_ids)?)
    }
}
