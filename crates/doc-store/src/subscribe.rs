use std::pin::Pin;
use std::task::{Context, Poll};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::document::Document;
use crate::path::CollectionPath;

/// A full snapshot of a collection at one point in its write order.
///
/// Snapshots replace whatever the consumer held before; they are never
/// deltas to accumulate.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot {
    /// The collection this snapshot belongs to.
    pub collection: CollectionPath,

    /// Every document in the collection, ordered by document ID.
    pub documents: Vec<Document>,
}

impl CollectionSnapshot {
    /// Decodes every document into a typed value.
    ///
    /// Documents that fail to decode are skipped with a warning; a
    /// consumer always gets a usable (possibly shorter) view.
    pub fn decode<T: DeserializeOwned>(&self) -> Vec<T> {
        self.documents
            .iter()
            .filter_map(|doc| match doc.decode::<T>() {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(
                        collection = %self.collection,
                        doc_id = %doc.id,
                        error = %err,
                        "skipping undecodable document"
                    );
                    None
                }
            })
            .collect()
    }

    /// Returns the number of documents in the snapshot.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the collection is empty at this point.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// A transport fault on a live subscription.
///
/// Non-fatal: the feed continues and the consumer's last snapshot
/// remains valid.
#[derive(Debug, Clone, Error)]
#[error("subscription transport error: {message}")]
pub struct TransportError {
    pub message: String,
}

/// One item on a subscription feed: a fresh snapshot or a fault notice.
pub type SubscriptionUpdate = std::result::Result<CollectionSnapshot, TransportError>;

/// A live subscription to one collection.
///
/// Yields the collection's current snapshot immediately, then one
/// snapshot per committed change. Ends when the subscription is
/// dropped or the store goes away.
#[derive(Debug)]
pub struct Subscription {
    collection: CollectionPath,
    rx: mpsc::UnboundedReceiver<SubscriptionUpdate>,
}

impl Subscription {
    pub(crate) fn new(
        collection: CollectionPath,
        rx: mpsc::UnboundedReceiver<SubscriptionUpdate>,
    ) -> Self {
        Self { collection, rx }
    }

    /// Returns the collection this subscription watches.
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Waits for the next update. Returns None once the feed has ended.
    pub async fn next(&mut self) -> Option<SubscriptionUpdate> {
        self.rx.recv().await
    }

    /// Ends the subscription explicitly.
    pub fn unsubscribe(self) {}
}

impl futures_core::Stream for Subscription {
    type Item = SubscriptionUpdate;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
