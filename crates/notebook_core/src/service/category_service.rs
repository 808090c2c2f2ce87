//! Category use-case service.
//!
//! # Responsibility
//! - Normalize and validate category names before persistence.
//! - Translate repository outcomes into the shared error taxonomy.
//!
//! # Invariants
//! - Names are trimmed; blank names never reach the repository.
//! - Renaming a category to its current name succeeds.

use crate::model::category::{normalize_category_name, Category, CategoryId};
use crate::repo::category_repo::CategoryRepository;
use crate::service::error::{EntityRef, ServiceError, ServiceResult};
use log::warn;

/// Category service facade over repository implementations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a category with a unique trimmed name.
    ///
    /// # Errors
    /// - `Validation` when the name is blank.
    /// - `Conflict` when another category already has the name.
    pub fn create_category(&mut self, name: &str) -> ServiceResult<Category> {
        let name = normalize_category_name(name)?;
        self.repo
            .create_category(name.as_str())
            .map_err(|err| log_conflict("category_create", err.into()))
    }

    /// Renames a category.
    ///
    /// # Errors
    /// - `Validation` when the name is blank.
    /// - `NotFound` when `id` is unknown.
    /// - `Conflict` when a different category already has the name.
    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> ServiceResult<Category> {
        let name = normalize_category_name(name)?;
        self.repo
            .rename_category(id, name.as_str())
            .map_err(|err| log_conflict("category_rename", err.into()))
    }

    /// Lists all categories ordered by name.
    pub fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.repo.list_categories()?)
    }

    /// Gets one category by id.
    pub fn get_category(&self, id: CategoryId) -> ServiceResult<Category> {
        self.repo
            .find_category_by_id(id)?
            .ok_or(ServiceError::NotFound(EntityRef::Category(id)))
    }

    /// Looks a category up by name, trimming the input first.
    ///
    /// Blank input matches nothing.
    pub fn find_category_by_name(&self, name: &str) -> ServiceResult<Option<Category>> {
        match normalize_category_name(name) {
            Ok(name) => Ok(self.repo.find_category_by_name(name.as_str())?),
            Err(_) => Ok(None),
        }
    }

    /// Deletes a category and detaches it from every note.
    pub fn delete_category(&mut self, id: CategoryId) -> ServiceResult<()> {
        self.repo.delete_category(id)?;
        Ok(())
    }
}

fn log_conflict(event: &str, err: ServiceError) -> ServiceError {
    if let ServiceError::Conflict { .. } = err {
        warn!("event={event} module=service status=error error_code=name_conflict");
    }
    err
}
