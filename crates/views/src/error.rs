//! View error types.

use thiserror::Error;

/// Errors that can occur while starting or feeding a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] doc_store::StoreError),

    /// A domain operation backing the view failed.
    #[error("domain error: {0}")]
    Domain(#[from] domain::DomainError),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
