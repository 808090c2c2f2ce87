//! Error taxonomy shared by every notebook use-case.
//!
//! # Responsibility
//! - Classify failures into validation / not-found / conflict / internal.
//! - Give the boundary layer a stable status mapping for each class.
//!
//! # Invariants
//! - A UNIQUE constraint violation on category names is always reported as
//!   `Conflict`, whether caught by the pre-check or by the store.
//! - Unclassified storage failures pass through unchanged in `Repo`.

use crate::db::DbError;
use crate::model::category::CategoryId;
use crate::model::note::NoteId;
use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entity an operation targeted when it was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Note(NoteId),
    Category(CategoryId),
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note(id) => write!(f, "note {id}"),
            Self::Category(id) => write!(f, "category {id}"),
        }
    }
}

/// Coarse failure class used by boundary layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// HTTP status code a web boundary would answer with.
    pub fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Stable lowercase label for logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

/// Service error for note/category use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input is malformed.
    Validation(ValidationError),
    /// Target entity does not exist.
    NotFound(EntityRef),
    /// Category name is already in use.
    Conflict { name: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::Conflict { name } => write!(
                f,
                "category name `{name}` is already in use; categories must be unique"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NoteNotFound(id) => Self::NotFound(EntityRef::Note(id)),
            RepoError::CategoryNotFound(id) => Self::NotFound(EntityRef::Category(id)),
            RepoError::DuplicateCategoryName(name) => Self::Conflict { name },
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityRef, ErrorKind, ServiceError};
    use crate::model::validation::ValidationError;
    use crate::repo::RepoError;

    #[test]
    fn repo_errors_are_classified() {
        let err = ServiceError::from(RepoError::NoteNotFound(4));
        assert!(matches!(err, ServiceError::NotFound(EntityRef::Note(4))));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = ServiceError::from(RepoError::DuplicateCategoryName("Work".to_string()));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("`Work`"));

        let err = ServiceError::from(RepoError::InvalidData("bad".to_string()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn kinds_map_to_http_statuses() {
        assert_eq!(
            ServiceError::from(ValidationError::EmptyCategoryName)
                .kind()
                .http_status(),
            400
        );
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::Conflict.http_status(), 409);
        assert_eq!(ErrorKind::Internal.http_status(), 500);
    }
}
