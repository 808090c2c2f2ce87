//! Domain model for notes, categories and their validation rules.
//!
//! # Responsibility
//! - Define the records returned across the core operation boundary.
//! - Own input normalization that must happen before persistence.
//!
//! # Invariants
//! - Every note and category is identified by a store-assigned integer id.
//! - A `Note` read result always carries its current categories inline.

pub mod category;
pub mod note;
pub mod validation;
