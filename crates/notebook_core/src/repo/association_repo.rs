//! Note/category association persistence.
//!
//! # Responsibility
//! - Own every write to the `note_categories` join table.
//! - Hydrate note read views with their current categories.
//!
//! # Invariants
//! - Mutating functions take a `Transaction`, so they always run inside the
//!   caller's unit of work.
//! - A `(note_id, category_id)` pair is stored at most once.
//! - Replacement is full: the previous set for a note is discarded.
//! - Category ids that do not resolve to a live category are dropped.

use crate::model::category::{Category, CategoryId};
use crate::model::note::NoteId;
use crate::repo::RepoResult;
use log::debug;
use rusqlite::{params, Connection, Transaction};
use std::collections::BTreeSet;

/// Replaces the full category set of `note_id`.
///
/// The caller is responsible for checking that the note exists inside the
/// same transaction. Returns the number of associations written.
pub fn replace_for_note(
    tx: &Transaction<'_>,
    note_id: NoteId,
    category_ids: &[CategoryId],
) -> RepoResult<usize> {
    remove_all_for_note(tx, note_id)?;

    let distinct: BTreeSet<CategoryId> = category_ids.iter().copied().collect();
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO note_categories (note_id, category_id)
             SELECT ?1, id
             FROM categories
             WHERE id = ?2;",
        )?;
        for category_id in &distinct {
            inserted += stmt.execute(params![note_id, category_id])?;
        }
    }

    let dropped = distinct.len() - inserted;
    if dropped > 0 {
        debug!(
            "event=note_categories_replace module=repo status=ok note_id={note_id} dropped_unknown={dropped}"
        );
    }

    Ok(inserted)
}

/// Removes every association that references `note_id`.
///
/// Idempotent; returns the number of rows removed.
pub fn remove_all_for_note(tx: &Transaction<'_>, note_id: NoteId) -> RepoResult<usize> {
    let removed = tx.execute(
        "DELETE FROM note_categories WHERE note_id = ?1;",
        [note_id],
    )?;
    Ok(removed)
}

/// Removes every association that references `category_id`.
///
/// Idempotent; returns the number of rows removed.
pub fn remove_all_for_category(
    tx: &Transaction<'_>,
    category_id: CategoryId,
) -> RepoResult<usize> {
    let removed = tx.execute(
        "DELETE FROM note_categories WHERE category_id = ?1;",
        [category_id],
    )?;
    Ok(removed)
}

/// Returns the categories currently associated with `note_id`, ordered by
/// name then id.
pub fn categories_for_note(conn: &Connection, note_id: NoteId) -> RepoResult<Vec<Category>> {
    let mut stmt = conn.prepare_cached(
        "SELECT c.id, c.name
         FROM note_categories nc
         INNER JOIN categories c ON c.id = nc.category_id
         WHERE nc.note_id = ?1
         ORDER BY c.name ASC, c.id ASC;",
    )?;
    let mut rows = stmt.query([note_id])?;
    let mut categories = Vec::new();
    while let Some(row) = rows.next()? {
        categories.push(Category {
            id: row.get(0)?,
            name: row.get(1)?,
        });
    }
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::{
        categories_for_note, remove_all_for_category, remove_all_for_note, replace_for_note,
    };
    use crate::db::open_db_in_memory;
    use rusqlite::{params, Connection};

    fn seed(conn: &Connection) -> (i64, i64, i64) {
        conn.execute(
            "INSERT INTO notes (title, content, archived, created_at, updated_at)
             VALUES ('t', 'c', 0, 1, 1);",
            [],
        )
        .unwrap();
        let note_id = conn.last_insert_rowid();
        conn.execute("INSERT INTO categories (name) VALUES ('Work');", [])
            .unwrap();
        let work = conn.last_insert_rowid();
        conn.execute("INSERT INTO categories (name) VALUES ('Home');", [])
            .unwrap();
        let home = conn.last_insert_rowid();
        (note_id, work, home)
    }

    fn link_count(conn: &Connection, note_id: i64) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM note_categories WHERE note_id = ?1;",
            params![note_id],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn replace_collapses_duplicates_and_drops_unknown_ids() {
        let mut conn = open_db_in_memory().unwrap();
        let (note_id, work, home) = seed(&conn);

        let tx = conn.transaction().unwrap();
        let inserted = replace_for_note(&tx, note_id, &[work, work, home, 9_999]).unwrap();
        tx.commit().unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(link_count(&conn, note_id), 2);
        let names: Vec<String> = categories_for_note(&conn, note_id)
            .unwrap()
            .into_iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, vec!["Home".to_string(), "Work".to_string()]);
    }

    #[test]
    fn replace_discards_previous_set() {
        let mut conn = open_db_in_memory().unwrap();
        let (note_id, work, home) = seed(&conn);

        let tx = conn.transaction().unwrap();
        replace_for_note(&tx, note_id, &[work, home]).unwrap();
        replace_for_note(&tx, note_id, &[home]).unwrap();
        tx.commit().unwrap();

        let ids: Vec<i64> = categories_for_note(&conn, note_id)
            .unwrap()
            .into_iter()
            .map(|category| category.id)
            .collect();
        assert_eq!(ids, vec![home]);
    }

    #[test]
    fn removals_are_idempotent() {
        let mut conn = open_db_in_memory().unwrap();
        let (note_id, work, home) = seed(&conn);

        let tx = conn.transaction().unwrap();
        replace_for_note(&tx, note_id, &[work, home]).unwrap();
        assert_eq!(remove_all_for_category(&tx, work).unwrap(), 1);
        assert_eq!(remove_all_for_category(&tx, work).unwrap(), 0);
        assert_eq!(remove_all_for_note(&tx, note_id).unwrap(), 1);
        assert_eq!(remove_all_for_note(&tx, note_id).unwrap(), 0);
        tx.commit().unwrap();

        assert!(categories_for_note(&conn, note_id).unwrap().is_empty());
    }
}
