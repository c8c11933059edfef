//! Generic full-snapshot collection mirror.

use doc_store::{CollectionPath, DocumentStore};
use serde::de::DeserializeOwned;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::error::Result;

/// Non-fatal notice surfaced to the caller when a view's feed hits
/// trouble. The view itself keeps serving its last-known-good state.
#[derive(Debug, Clone)]
pub struct SyncNotice {
    pub collection: String,
    pub message: String,
}

/// Mirrors one collection into a locally cached, typed view.
///
/// The mirror is seeded from the collection's current snapshot before
/// `start` returns. Afterwards every pushed snapshot replaces the
/// cached state wholesale; snapshots are authoritative, never deltas.
/// Dropping the mirror unsubscribes.
pub struct Mirror<T> {
    collection: CollectionPath,
    rx: watch::Receiver<Vec<T>>,
    notices: broadcast::Sender<SyncNotice>,
    task: JoinHandle<()>,
}

impl<T> Mirror<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Subscribes to a collection and seeds the mirror.
    pub async fn start<S: DocumentStore>(store: &S, collection: CollectionPath) -> Result<Self> {
        let mut subscription = store.subscribe(&collection).await?;

        // The store queues the current snapshot at subscribe time, so
        // this resolves immediately.
        let initial = match subscription.next().await {
            Some(Ok(snapshot)) => snapshot.decode::<T>(),
            _ => Vec::new(),
        };

        let (tx, rx) = watch::channel(initial);
        let (notices, _) = broadcast::channel(16);
        let notices_tx = notices.clone();
        let label = collection.clone();

        let task = tokio::spawn(async move {
            while let Some(update) = subscription.next().await {
                match update {
                    Ok(snapshot) => {
                        metrics::counter!("view_snapshots_applied").increment(1);
                        if tx.send(snapshot.decode::<T>()).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        // Keep the last-known-good view, just tell the caller.
                        tracing::warn!(
                            collection = %label,
                            error = %err,
                            "subscription fault, retaining cached view"
                        );
                        let _ = notices_tx.send(SyncNotice {
                            collection: label.to_string(),
                            message: err.to_string(),
                        });
                    }
                }
            }
        });

        Ok(Self {
            collection,
            rx,
            notices,
            task,
        })
    }

    /// Returns the collection this mirror follows.
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Returns the current cached state.
    pub fn current(&self) -> Vec<T> {
        self.rx.borrow().clone()
    }

    /// Returns a watch handle that observes every applied snapshot.
    pub fn watch(&self) -> watch::Receiver<Vec<T>> {
        self.rx.clone()
    }

    /// Returns a receiver for non-fatal sync notices.
    pub fn notices(&self) -> broadcast::Receiver<SyncNotice> {
        self.notices.subscribe()
    }
}

impl<T> Drop for Mirror<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
