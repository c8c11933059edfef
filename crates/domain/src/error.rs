//! Domain error taxonomy.
//!
//! Every failure here means "the operation did not happen and state is
//! unchanged": validation failures are raised before any store write,
//! and store failures cannot leave partial effects because all writes
//! go through atomic batches.

use doc_store::StoreError;
use thiserror::Error;

use crate::order::OrderStatus;

/// A request rejected before any write was attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Checkout requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A required shipping field is blank.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// Checkout requires a proof-of-payment attachment.
    #[error("proof-of-payment attachment is required")]
    MissingReceipt,

    /// Shipping an order requires a tracking number.
    #[error("tracking number is required")]
    MissingTrackingNumber,

    /// Quantities start at 1.
    #[error("invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity { quantity: u32 },

    /// Prices must not be negative.
    #[error("invalid price: {cents} (must not be negative)")]
    InvalidPrice { cents: i64 },

    /// Products need a name.
    #[error("product name must not be blank")]
    BlankName,

    /// The order is not in the state the action requires.
    #[error("cannot {action} from {status} status")]
    InvalidTransition {
        status: OrderStatus,
        action: &'static str,
    },
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request was rejected before reaching the store.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A store read, write or subscription failed. Non-fatal; the
    /// caller may retry and cached views keep their last-known-good
    /// value.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A document payload could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The attachment encoder failed; the submission that needed the
    /// attachment must not proceed.
    #[error("attachment encoding failed: {0}")]
    Encoding(String),

    /// The identity provider could not supply a customer identifier.
    #[error("identity unavailable: {0}")]
    Identity(String),
}
