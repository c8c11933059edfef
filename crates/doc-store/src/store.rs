use async_trait::async_trait;
use serde_json::Value;

use crate::batch::WriteBatch;
use crate::document::Document;
use crate::error::Result;
use crate::path::{CollectionPath, DocumentPath};
use crate::subscribe::Subscription;

/// Core trait for document store implementations.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a single document.
    ///
    /// Returns None if the document does not exist.
    async fn get(&self, doc: &DocumentPath) -> Result<Option<Document>>;

    /// Reads every document in a collection.
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>>;

    /// Applies a batch of writes as a single all-or-nothing unit.
    ///
    /// The batch is validated in full before anything is applied; a
    /// rejected batch leaves no trace. All constituent writes become
    /// visible together to every observer, including live subscribers.
    async fn commit(&self, batch: WriteBatch) -> Result<()>;

    /// Subscribes to a collection.
    ///
    /// The subscription immediately yields the current full snapshot,
    /// then one full snapshot per committed change to the collection.
    /// Transport faults arrive as non-fatal error items on the same
    /// stream. Dropping the subscription unsubscribes.
    async fn subscribe(&self, collection: &CollectionPath) -> Result<Subscription>;
}

/// Extension trait providing single-document conveniences.
///
/// Each method is a one-op batch commit, so it carries the same
/// atomicity and visibility guarantees as [`DocumentStore::commit`].
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    /// Creates or replaces a single document.
    async fn put(&self, doc: &DocumentPath, data: Value) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.put(doc.clone(), data);
        self.commit(batch).await
    }

    /// Creates or shallow-merges fields into a single document.
    async fn merge(&self, doc: &DocumentPath, fields: Value) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.merge(doc.clone(), fields);
        self.commit(batch).await
    }

    /// Shallow-merges fields into an existing document.
    async fn update(&self, doc: &DocumentPath, fields: Value) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.update(doc.clone(), fields);
        self.commit(batch).await
    }

    /// Deletes a single document. Absence is not an error.
    async fn delete(&self, doc: &DocumentPath) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.delete(doc.clone());
        self.commit(batch).await
    }

    /// Returns true if the document exists.
    async fn exists(&self, doc: &DocumentPath) -> Result<bool> {
        Ok(self.get(doc).await?.is_some())
    }
}

// Blanket implementation for all DocumentStore implementations
impl<T: DocumentStore + ?Sized> DocumentStoreExt for T {}
