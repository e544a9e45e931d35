//! Error types for IronTick wire operations.

use thiserror::Error;

/// Error type for wire-format operations.
#[derive(Debug, Error)]
pub enum WireError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unrecognized streaming mode name.
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// Text postback did not match the venue envelope.
    #[error("malformed postback: {0}")]
    Postback(String),
}

/// Result type alias for IronTick wire operations.
pub type Result<T> = std::result::Result<T, WireError>;
