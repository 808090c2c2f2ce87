//! Note domain model and write requests.
//!
//! # Responsibility
//! - Define the denormalized note read view (note + categories).
//! - Define create/partial-update requests and their validation.
//!
//! # Invariants
//! - `archived` is a plain two-state flag; every transition is allowed.
//! - `updated_at >= created_at` for persisted notes.
//! - `categories` is ordered by name, then id.

use crate::model::category::{Category, CategoryId};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned note identifier.
pub type NoteId = i64;

/// Note read view returned by every note operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub archived: bool,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Last mutation timestamp in epoch milliseconds.
    pub updated_at: i64,
    /// Categories currently associated with this note.
    pub categories: Vec<Category>,
}

impl Note {
    /// Returns whether the note is tagged with `category_id`.
    pub fn has_category(&self, category_id: CategoryId) -> bool {
        self.categories
            .iter()
            .any(|category| category.id == category_id)
    }

    /// Returns ids of associated categories in read-view order.
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|category| category.id).collect()
    }
}

/// Request model for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    /// Defaults to `false` when omitted.
    #[serde(default)]
    pub archived: bool,
}

impl NewNote {
    /// Creates an active (non-archived) note request.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            archived: false,
        }
    }

    /// Overrides the initial archive flag.
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Rejects a blank title. Content may be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update for a note. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NotePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

impl NotePatch {
    /// Patch that only touches the archive flag.
    pub fn archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Self::default()
        }
    }

    /// Replaces the title; validated on `update_note`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the content; an empty string is allowed.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Returns whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.archived.is_none()
    }

    /// Rejects a supplied title that is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.title.as_deref() {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyNoteTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewNote, NotePatch};
    use crate::model::validation::ValidationError;

    #[test]
    fn new_note_defaults_to_active() {
        let note = NewNote::new("T", "C");
        assert!(!note.archived);
        assert!(note.archived(true).archived);
    }

    #[test]
    fn new_note_rejects_blank_title_but_allows_empty_content() {
        assert_eq!(
            NewNote::new("   ", "body").validate(),
            Err(ValidationError::EmptyNoteTitle)
        );
        assert_eq!(NewNote::new("title", "").validate(), Ok(()));
    }

    #[test]
    fn patch_validation_ignores_omitted_title() {
        assert_eq!(NotePatch::archived(true).validate(), Ok(()));
        assert_eq!(
            NotePatch::default().with_title(" ").validate(),
            Err(ValidationError::EmptyNoteTitle)
        );
    }

    #[test]
    fn archived_patch_touches_only_the_flag() {
        let patch = NotePatch::archived(false);
        assert_eq!(patch.archived, Some(false));
        assert!(patch.title.is_none());
        assert!(patch.content.is_none());
        assert!(!patch.is_empty());
        assert!(NotePatch::default().is_empty());
    }
}
