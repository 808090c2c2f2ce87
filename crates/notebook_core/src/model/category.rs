//! Category domain model.
//!
//! # Invariants
//! - `name` is stored trimmed and is never empty.
//! - Names compare exactly (case-sensitive) after trimming.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned category identifier.
pub type CategoryId = i64;

/// A user-defined label that notes can be tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Trims a category name and rejects it when nothing is left.
///
/// Case is preserved; `"Work"` and `"work"` are distinct names.
pub fn normalize_category_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_category_name;
    use crate::model::validation::ValidationError;

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        assert_eq!(normalize_category_name("  Work \t").unwrap(), "Work");
    }

    #[test]
    fn normalize_keeps_case_and_inner_spaces() {
        assert_eq!(
            normalize_category_name(" Side Projects ").unwrap(),
            "Side Projects"
        );
        assert_eq!(normalize_category_name("WORK").unwrap(), "WORK");
    }

    #[test]
    fn normalize_rejects_blank_names() {
        assert_eq!(
            normalize_category_name(" \n ").unwrap_err(),
            ValidationError::EmptyCategoryName
        );
        assert_eq!(
            normalize_category_name("").unwrap_err(),
            ValidationError::EmptyCategoryName
        );
    }
}
