//! Feed of persisted notification records.

use doc_store::DocumentStore;
use domain::{Notification, collections};
use tokio::sync::{broadcast, watch};

use crate::error::Result;
use crate::mirror::{Mirror, SyncNotice};

/// Mirrors the public append-only notification log.
pub struct NotificationFeed {
    mirror: Mirror<Notification>,
}

impl NotificationFeed {
    /// Starts mirroring the notification log.
    pub async fn start<S: DocumentStore>(store: &S) -> Result<Self> {
        Ok(Self {
            mirror: Mirror::start(store, collections::notifications()).await?,
        })
    }

    /// Returns the records in store order.
    pub fn records(&self) -> Vec<Notification> {
        self.mirror.current()
    }

    /// Returns the records, most recently sent first.
    pub fn recent_first(&self) -> Vec<Notification> {
        let mut records = self.mirror.current();
        records.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        records
    }

    /// Watches the notification log.
    pub fn watch(&self) -> watch::Receiver<Vec<Notification>> {
        self.mirror.watch()
    }

    /// Returns a receiver for non-fatal sync notices.
    pub fn notices(&self) -> broadcast::Receiver<SyncNotice> {
        self.mirror.notices()
    }
}
