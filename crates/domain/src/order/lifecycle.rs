//! Order lifecycle: admin transitions with notification side effects.

use doc_store::{DocumentStore, WriteBatch};

use crate::error::{DomainError, ValidationError};
use crate::gateway::Attachment;
use crate::notification::{Notification, NotificationEmitter};

use super::{Order, OrderRepository, OrderStatus, Tracking};

/// Tracking details submitted with a ship or edit action.
#[derive(Debug, Clone)]
pub struct TrackingUpdate {
    pub number: String,
    pub attachment: Option<Attachment>,
}

/// Drives orders through the forward-only status machine.
///
/// Every transition commits the status fields on both order copies and
/// any notification record as a single atomic batch: "transition
/// happened" and "notification recorded" cannot diverge.
pub struct OrderLifecycle<S: DocumentStore> {
    repo: OrderRepository<S>,
    emitter: NotificationEmitter,
}

impl<S: DocumentStore> OrderLifecycle<S> {
    /// Creates a new lifecycle service over the given store.
    pub fn new(store: S) -> Self {
        Self {
            repo: OrderRepository::new(store),
            emitter: NotificationEmitter::new(),
        }
    }

    /// Confirms receipt of payment: `PendingConfirmation → Processing`.
    ///
    /// Emits one notification to the order's shipping email in the
    /// same commit.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn confirm_payment(&self, order: &Order) -> Result<Order, DomainError> {
        if !order.status.can_confirm_payment() {
            return Err(ValidationError::InvalidTransition {
                status: order.status,
                action: "confirm payment",
            }
            .into());
        }

        let mut updated = order.clone();
        updated.status = OrderStatus::Processing;

        let mut batch = WriteBatch::new();
        self.repo.stage_update(
            &mut batch,
            &order.customer_id,
            order.id,
            serde_json::json!({ "status": OrderStatus::Processing }),
        );
        self.emitter
            .stage(&mut batch, Notification::payment_confirmed(order))?;
        self.repo.commit(batch).await?;

        metrics::counter!("order_transitions").increment(1);
        tracing::info!(status = %updated.status, "payment confirmed");
        Ok(updated)
    }

    /// Ships the order: `Processing → Shipped`.
    ///
    /// Requires a non-blank tracking number; a blank number fails
    /// locally and writes nothing. Emits one notification carrying the
    /// tracking number in the same commit.
    #[tracing::instrument(skip(self, order, update), fields(order_id = %order.id))]
    pub async fn prepare_shipment(
        &self,
        order: &Order,
        update: TrackingUpdate,
    ) -> Result<Order, DomainError> {
        if update.number.trim().is_empty() {
            return Err(ValidationError::MissingTrackingNumber.into());
        }
        if !order.status.can_prepare_shipment() {
            return Err(ValidationError::InvalidTransition {
                status: order.status,
                action: "prepare shipment",
            }
            .into());
        }

        let mut updated = order.clone();
        updated.status = OrderStatus::Shipped;
        updated.tracking = Some(merge_tracking(order, update));

        let mut batch = WriteBatch::new();
        self.repo.stage_update(
            &mut batch,
            &order.customer_id,
            order.id,
            serde_json::json!({
                "status": OrderStatus::Shipped,
                "tracking": updated.tracking,
            }),
        );
        let number = updated
            .tracking
            .as_ref()
            .map(|t| t.number.as_str())
            .unwrap_or_default();
        self.emitter
            .stage(&mut batch, Notification::shipped(order, number))?;
        self.repo.commit(batch).await?;

        metrics::counter!("order_transitions").increment(1);
        tracing::info!(status = %updated.status, "order shipped");
        Ok(updated)
    }

    /// Edits tracking details of an already shipped order in place.
    ///
    /// No status change and no notification: corrections are quiet.
    #[tracing::instrument(skip(self, order, update), fields(order_id = %order.id))]
    pub async fn edit_shipment(
        &self,
        order: &Order,
        update: TrackingUpdate,
    ) -> Result<Order, DomainError> {
        if update.number.trim().is_empty() {
            return Err(ValidationError::MissingTrackingNumber.into());
        }
        if !order.status.can_edit_shipment() {
            return Err(ValidationError::InvalidTransition {
                status: order.status,
                action: "edit shipment",
            }
            .into());
        }

        let mut updated = order.clone();
        updated.tracking = Some(merge_tracking(order, update));

        let mut batch = WriteBatch::new();
        self.repo.stage_update(
            &mut batch,
            &order.customer_id,
            order.id,
            serde_json::json!({ "tracking": updated.tracking }),
        );
        self.repo.commit(batch).await?;

        tracing::info!("shipment details edited");
        Ok(updated)
    }

    /// Deletes both copies of an order. Allowed from any status, not a
    /// transition, produces no notification, and cannot be undone.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn delete(&self, order: &Order) -> Result<(), DomainError> {
        let mut batch = WriteBatch::new();
        self.repo
            .stage_delete(&mut batch, &order.customer_id, order.id);
        self.repo.commit(batch).await?;

        tracing::info!("order deleted");
        Ok(())
    }
}

/// Keeps the existing tracking attachment when the update carries none.
fn merge_tracking(order: &Order, update: TrackingUpdate) -> Tracking {
    let attachment = update
        .attachment
        .or_else(|| order.tracking.as_ref().and_then(|t| t.attachment.clone()));
    Tracking {
        number: update.number,
        attachment,
    }
}
