//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Classify every failure into the shared `ServiceError` taxonomy.

pub mod category_service;
pub mod error;
pub mod note_service;
