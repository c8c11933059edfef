use thiserror::Error;

use crate::path::DocumentPath;

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A targeted document does not exist (e.g. an update op in a batch).
    #[error("document not found: {0}")]
    NotFound(DocumentPath),

    /// A write was rejected before anything was applied.
    #[error("invalid write: {0}")]
    InvalidWrite(String),

    /// The transport to the store failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A serialization/deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
