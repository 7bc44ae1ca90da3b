//! Cross-cutting error types for qsheet.
//!
//! Domain-specific errors (`StorageError`, `RemoteError`, ...) live in their
//! respective crates. A unified `StoreError` is defined in `qsheet-store`
//! where all crate errors converge.

use thiserror::Error;

/// Errors that can be raised by any qsheet crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (blank title, blank question text).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on the given kind.
    #[must_use]
    pub fn not_found(kind: crate::EntityKind, id: &str) -> Self {
        Self::NotFound {
            entity_type: kind.to_string(),
            id: id.to_string(),
        }
    }
}
