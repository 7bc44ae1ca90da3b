//! Remote endpoint error types.

use thiserror::Error;

/// Errors that can occur when fetching a sheet from the remote endpoint.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Response body was not a usable sheet payload.
    #[error("parse error: {0}")]
    Parse(String),
}
