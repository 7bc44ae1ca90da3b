//! Unified error type for qsheet-store.

use qsheet_config::ConfigError;
use qsheet_core::CoreError;
use qsheet_remote::RemoteError;
use qsheet_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the gateway and the service.
///
/// Load failures never reach callers as errors; they degrade to local data
/// plus an advisory message. What is left are input validation, construction,
/// and the explicit storage calls.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored copy could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
