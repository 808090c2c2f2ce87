//! Category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist categories and enforce name uniqueness.
//! - Delete categories together with their associations.
//!
//! # Invariants
//! - Names are expected trimmed and non-empty; callers normalize first.
//! - Uniqueness is checked inside the write transaction and backed by the
//!   `categories.name` UNIQUE constraint; both surface as
//!   `RepoError::DuplicateCategoryName`.
//! - List order is `name ASC, id ASC`.

use crate::model::category::{Category, CategoryId};
use crate::repo::association_repo;
use crate::repo::{ensure_schema, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Tables and columns this repository reads and writes.
pub(crate) const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("categories", &["id", "name"]),
    ("note_categories", &["note_id", "category_id"]),
];

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Inserts a new category unless the name is already taken.
    fn create_category(&mut self, name: &str) -> RepoResult<Category>;
    /// Renames a category unless another category holds the name.
    fn rename_category(&mut self, id: CategoryId, name: &str) -> RepoResult<Category>;
    /// Returns all categories sorted by name, then id.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Gets one category by id.
    fn find_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Gets one category by exact name.
    fn find_category_by_name(&self, name: &str) -> RepoResult<Option<Category>>;
    /// Removes a category and all its associations in one transaction.
    ///
    /// Returns the number of associations removed.
    fn delete_category(&mut self, id: CategoryId) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
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

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&mut self, name: &str) -> RepoResult<Category> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if find_by_name(&tx, name)?.is_some() {
            return Err(RepoError::DuplicateCategoryName(name.to_string()));
        }

        tx.execute("INSERT INTO categories (name) VALUES (?1);", [name])
            .map_err(|err| map_name_conflict(err, name))?;
        let category = Category {
            id: tx.last_insert_rowid(),
            name: name.to_string(),
        };
        tx.commit()?;

        info!(
            "event=category_create module=repo status=ok category_id={}",
            category.id
        );
        Ok(category)
    }

    fn rename_category(&mut self, id: CategoryId, name: &str) -> RepoResult<Category> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if find_by_id(&tx, id)?.is_none() {
            return Err(RepoError::CategoryNotFound(id));
        }

        let taken: bool = tx.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM categories WHERE name = ?1 AND id <> ?2
            );",
            params![name, id],
            |row| row.get(0),
        )?;
        if taken {
            return Err(RepoError::DuplicateCategoryName(name.to_string()));
        }

        tx.execute(
            "UPDATE categories SET name = ?2 WHERE id = ?1;",
            params![id, name],
        )
        .map_err(|err| map_name_conflict(err, name))?;
        tx.commit()?;

        info!("event=category_rename module=repo status=ok category_id={id}");
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY name ASC, id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(Category {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(categories)
    }

    fn find_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        find_by_id(self.conn, id)
    }

    fn find_category_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        find_by_name(self.conn, name)
    }

    fn delete_category(&mut self, id: CategoryId) -> RepoResult<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed_links = delete_category_in_tx(&tx, id)?;
        tx.commit()?;

        info!(
            "event=category_delete module=repo status=ok category_id={id} removed_links={removed_links}"
        );
        Ok(removed_links)
    }
}

/// Cascading delete for one category: associations first, then the row.
fn delete_category_in_tx(tx: &Transaction<'_>, id: CategoryId) -> RepoResult<usize> {
    if find_by_id(tx, id)?.is_none() {
        return Err(RepoError::CategoryNotFound(id));
    }
    let removed_links = association_repo::remove_all_for_category(tx, id)?;
    tx.execute("DELETE FROM categories WHERE id = ?1;", [id])?;
    Ok(removed_links)
}

fn find_by_id(conn: &Connection, id: CategoryId) -> RepoResult<Option<Category>> {
    let category = conn
        .query_row(
            "SELECT id, name FROM categories WHERE id = ?1;",
            [id],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(category)
}

fn find_by_name(conn: &Connection, name: &str) -> RepoResult<Option<Category>> {
    let category = conn
        .query_row(
            "SELECT id, name FROM categories WHERE name = ?1;",
            [name],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(category)
}

fn map_name_conflict(err: rusqlite::Error, name: &str) -> RepoError {
    let err = RepoError::from(err);
    match &err {
        RepoError::Db(db_err) if db_err.is_unique_violation() => {
            RepoError::DuplicateCategoryName(name.to_string())
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::map_name_conflict;
    use crate::db::open_db_in_memory;
    use crate::repo::RepoError;
    use crate::service::error::{ErrorKind, ServiceError};

    #[test]
    fn store_unique_violation_maps_to_duplicate_name_and_conflict() {
        let conn = open_db_in_memory().unwrap();
        conn.execute("INSERT INTO categories (name) VALUES ('Work');", [])
            .unwrap();
        let raw = conn
            .execute("INSERT INTO categories (name) VALUES ('Work');", [])
            .unwrap_err();

        let err = map_name_conflict(raw, "Work");
        assert!(matches!(&err, RepoError::DuplicateCategoryName(name) if name == "Work"));
        assert_eq!(ServiceError::from(err).kind(), ErrorKind::Conflict);
    }

    #[test]
    fn other_store_failures_pass_through_unchanged() {
        let conn = open_db_in_memory().unwrap();
        let raw = conn
            .execute("INSERT INTO categories (name) VALUES (NULL);", [])
            .unwrap_err();

        let err = map_name_conflict(raw, "Work");
        assert!(matches!(err, RepoError::Db(_)));
        assert_eq!(ServiceError::from(err).kind(), ErrorKind::Internal);
    }
}
