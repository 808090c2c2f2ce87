//! Input validation errors raised before any storage access.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Category name is empty after trimming.
    EmptyCategoryName,
    /// Note title is empty after trimming.
    EmptyNoteTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategoryName => write!(f, "category name cannot be empty"),
            Self::EmptyNoteTitle => write!(f, "note title cannot be empty"),
        }
    }
}

impl Error for ValidationError {}
