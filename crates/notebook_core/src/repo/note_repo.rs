//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist notes and their archive flag.
//! - Delegate association writes to `association_repo` inside the same
//!   transaction (category replacement and delete cleanup).
//!
//! # Invariants
//! - Every read returns the note with its categories hydrated, both loaded
//!   inside one read transaction.
//! - Existence is checked before any update/delete inside the write
//!   transaction, so a missing note never leaves a partial write.
//! - Any mutation, category replacement included, refreshes `updated_at`.
//! - List order is `created_at DESC, id DESC`.

use crate::model::category::CategoryId;
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::repo::association_repo;
use crate::repo::{bool_to_int, ensure_schema, int_to_bool, now_epoch_ms, RepoError, RepoResult};
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    archived,
    created_at,
    updated_at
FROM notes";

/// Tables and columns this repository reads and writes.
pub(crate) const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "notes",
        &["id", "title", "content", "archived", "created_at", "updated_at"],
    ),
    ("categories", &["id", "name"]),
    ("note_categories", &["note_id", "category_id"]),
];

/// Query options for note list use-cases.
///
/// Both filters combine with AND; an empty query lists every note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Exact match on the archive flag.
    pub archived: Option<bool>,
    /// Only notes associated with this category.
    pub category_id: Option<CategoryId>,
}

impl NoteListQuery {
    /// Restricts the listing to archived (`true`) or active (`false`) notes.
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Restricts the listing to notes tagged with `category_id`.
    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Inserts one note with no associations.
    fn create_note(&mut self, note: &NewNote) -> RepoResult<Note>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists notes newest first using the optional filters.
    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>>;
    /// Applies a partial update and returns the refreshed note.
    fn update_note(&mut self, id: NoteId, patch: &NotePatch) -> RepoResult<Note>;
    /// Removes the note and its associations; returns the pre-delete snapshot.
    fn delete_note(&mut self, id: NoteId) -> RepoResult<Note>;
    /// Replaces the full category set of a note.
    fn set_note_categories(&mut self, id: NoteId, category_ids: &[CategoryId])
        -> RepoResult<Note>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_schema(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }

    /// Wraps a connection whose schema was already checked against
    /// `REQUIRED_SCHEMA`.
    pub(crate) fn from_checked(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&mut self, note: &NewNote) -> RepoResult<Note> {
        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO notes (title, content, archived, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4);",
            params![
                note.title.as_str(),
                note.content.as_str(),
                bool_to_int(note.archived),
                now
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        info!("event=note_create module=repo status=ok note_id={id}");
        Ok(Note {
            id,
            title: note.title.clone(),
            content: note.content.clone(),
            archived: note.archived,
            created_at: now,
            updated_at: now,
            categories: Vec::new(),
        })
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let tx = self.conn.unchecked_transaction()?;
        let note = load_note(&tx, id)?;
        tx.commit()?;
        Ok(note)
    }

    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>> {
        let tx = self.conn.unchecked_transaction()?;
        let notes = list_matching(&tx, query)?;
        tx.commit()?;
        Ok(notes)
    }

    fn update_note(&mut self, id: NoteId, patch: &NotePatch) -> RepoResult<Note> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !note_exists(&tx, id)? {
            return Err(RepoError::NoteNotFound(id));
        }

        tx.execute(
            "UPDATE notes
             SET
                title = COALESCE(?2, title),
                content = COALESCE(?3, content),
                archived = COALESCE(?4, archived),
                updated_at = MAX(?5, created_at)
             WHERE id = ?1;",
            params![
                id,
                patch.title.as_deref(),
                patch.content.as_deref(),
                patch.archived.map(bool_to_int),
                now_epoch_ms()
            ],
        )?;
        let note = load_note(&tx, id)?.ok_or(RepoError::NoteNotFound(id))?;
        tx.commit()?;

        info!("event=note_update module=repo status=ok note_id={id}");
        Ok(note)
    }

    fn delete_note(&mut self, id: NoteId) -> RepoResult<Note> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let snapshot = load_note(&tx, id)?.ok_or(RepoError::NoteNotFound(id))?;

        let removed_links = association_repo::remove_all_for_note(&tx, id)?;
        tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        tx.commit()?;

        info!(
            "event=note_delete module=repo status=ok note_id={id} removed_links={removed_links}"
        );
        Ok(snapshot)
    }

    fn set_note_categories(
        &mut self,
        id: NoteId,
        category_ids: &[CategoryId],
    ) -> RepoResult<Note> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !note_exists(&tx, id)? {
            return Err(RepoError::NoteNotFound(id));
        }

        let linked = association_repo::replace_for_note(&tx, id, category_ids)?;
        tx.execute(
            "UPDATE notes SET updated_at = MAX(?2, created_at) WHERE id = ?1;",
            params![id, now_epoch_ms()],
        )?;
        let note = load_note(&tx, id)?.ok_or(RepoError::NoteNotFound(id))?;
        tx.commit()?;

        info!("event=note_set_categories module=repo status=ok note_id={id} linked={linked}");
        Ok(note)
    }
}

fn list_matching(conn: &Connection, query: &NoteListQuery) -> RepoResult<Vec<Note>> {
    let mut sql = format!("{NOTE_SELECT_SQL} WHERE 1 = 1");
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(archived) = query.archived {
        sql.push_str(" AND archived = ?");
        bind_values.push(Value::Integer(bool_to_int(archived)));
    }

    if let Some(category_id) = query.category_id {
        sql.push_str(
            " AND EXISTS (
                SELECT 1
                FROM note_categories nc
                WHERE nc.note_id = notes.id
                  AND nc.category_id = ?
            )",
        );
        bind_values.push(Value::Integer(category_id));
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        let mut note = parse_note_row(row)?;
        note.categories = association_repo::categories_for_note(conn, note.id)?;
        notes.push(note);
    }

    Ok(notes)
}

fn load_note(conn: &Connection, id: NoteId) -> RepoResult<Option<Note>> {
    let mut stmt = conn.prepare_cached(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
    let note = stmt
        .query_row([id], |row| Ok(parse_note_row(row)))
        .optional()?
        .transpose()?;

    match note {
        Some(mut note) => {
            note.categories = association_repo::categories_for_note(conn, id)?;
            Ok(Some(note))
        }
        None => Ok(None),
    }
}

fn note_exists(conn: &Connection, id: NoteId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: NoteId = row.get("id")?;
    let created_at: i64 = row.get("created_at")?;
    let updated_at: i64 = row.get("updated_at")?;
    // Writes keep updated_at >= created_at; anything else was edited outside
    // the repository and is returned as stored.
    if updated_at < created_at {
        warn!(
            "event=note_read module=repo status=inconsistent note_id={id} created_at={created_at} updated_at={updated_at}"
        );
    }

    Ok(Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        archived: int_to_bool(row.get("archived")?, "notes.archived")?,
        created_at,
        updated_at,
        categories: Vec::new(),
    })
}
