//! Error types for the Tidemark library.

use thiserror::Error;

/// Main error type for Tidemark operations.
#[derive(Error, Debug)]
pub enum TidemarkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failures raised by the key-value store backend, passed through
    /// untranslated. Callers decide their own fail-open/fail-closed policy.
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Window state that could not be encoded for storage
    #[error("State encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A caller-supplied value that cannot be encoded as an HTTP header
    #[error("Invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TidemarkError {
    /// Wrap a backend failure without translating it.
    pub fn store<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TidemarkError::Store(err.into())
    }
}

/// Result type alias for Tidemark operations.
pub type Result<T> = std::result::Result<T, TidemarkError>;
