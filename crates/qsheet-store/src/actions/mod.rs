//! Tree actions on [`SheetService`](crate::SheetService).
//!
//! Each module adds methods to `SheetService` via `impl SheetService` blocks.
//! `add_*` return the new id and reject blank input; `edit_*`, `delete_*`
//! and moves return whether the tree changed, a missing id being a no-op.

pub mod arrange;
pub mod questions;
pub mod sub_topics;
pub mod topics;

use qsheet_core::{CoreError, EntityKind};

/// Trimmed `text`, or a validation error naming `field` when it is blank.
pub(crate) fn required(text: &str, kind: EntityKind, field: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{kind} {field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

/// Trimmed `text` for an edit, or `None` (logged) when it is blank.
pub(crate) fn edited(text: &str, kind: EntityKind, id: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        tracing::debug!(%kind, id, "blank edit ignored");
        return None;
    }
    Some(trimmed.to_string())
}
