//! Append-only notification records.

use chrono::{DateTime, Utc};
use doc_store::WriteBatch;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collections;
use crate::error::DomainError;
use crate::order::Order;

/// A persisted notification record.
///
/// Append-only: never mutated or deleted by this engine. Persistence
/// is the only delivery guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a record addressed to a recipient, stamped now.
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            sent_at: Utc::now(),
        }
    }

    /// The message sent when an order's payment is confirmed.
    pub fn payment_confirmed(order: &Order) -> Self {
        Self::new(
            order.shipping.email.clone(),
            format!(
                "Payment confirmed for order #{}",
                order.short_reference()
            ),
            format!(
                "Hi {},\n\nGood news! We have confirmed the payment for your \
                 order and are already preparing it.\n\nThanks for your purchase.",
                order.shipping.full_name
            ),
        )
    }

    /// The message sent when an order ships.
    pub fn shipped(order: &Order, tracking_number: &str) -> Self {
        Self::new(
            order.shipping.email.clone(),
            format!("Your order #{} is on its way", order.short_reference()),
            format!(
                "Hi {},\n\nYour order has shipped. You can follow it with \
                 tracking number {}.\n\nThanks for shopping with us.",
                order.shipping.full_name, tracking_number
            ),
        )
    }
}

/// Appends notification records as part of a caller's atomic commit.
///
/// The emitter never commits on its own: it stages the insert into the
/// batch of the state-machine transition that caused it, so the
/// transition and its notification land (or fail) together.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationEmitter;

impl NotificationEmitter {
    /// Creates a new emitter.
    pub fn new() -> Self {
        Self
    }

    /// Stages one notification insert into the caller's batch.
    pub fn stage(
        &self,
        batch: &mut WriteBatch,
        notification: Notification,
    ) -> Result<(), DomainError> {
        let doc = collections::notifications().doc(notification.id.to_string());
        batch.put(doc, serde_json::to_value(&notification)?);
        Ok(())
    }
}
