//! Error types for the Gratitude Board SDK

use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// SDK error types
#[derive(Error, Debug)]
pub enum BoardError {
    /// Input failed a purely local check; no external call was made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An authenticated account is required for this operation
    #[error("Authentication required")]
    AuthRequired,

    /// Another operation of the same kind is already in flight
    #[error("Operation already in progress: {0}")]
    Busy(String),

    /// Ledger read or transaction error
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Durable key-value store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Serialization(err.to_string())
    }
}
