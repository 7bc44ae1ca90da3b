//! # qsheet-store
//!
//! The question-sheet state container.
//!
//! [`SheetService`] holds one live [`Sheet`](qsheet_core::Sheet) and exposes
//! every action on it: adding, editing, and deleting topics, subtopics, and
//! questions; reordering and moving; one-slot undo; search; and local-first
//! loading through the [`PersistenceGateway`].

pub mod actions;
pub mod error;
pub mod gateway;
pub mod service;
mod test_support;

pub use error::StoreError;
pub use gateway::{LoadOptions, LoadOutcome, PersistenceGateway};
pub use service::{DEFAULT_UNDO_TTL, SheetService};

/// Install a `tracing` subscriber for embedding applications and tests.
///
/// The filter is read from `QSHEET_LOG`, falling back to `level`.
///
/// # Errors
///
/// Returns [`StoreError::Other`] if a global subscriber is already installed.
pub fn init_tracing(level: &str) -> Result<(), StoreError> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("QSHEET_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
