use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{RwLock, mpsc};

use crate::{
    CollectionPath, CollectionSnapshot, Document, DocumentPath, Result, StoreError, Subscription,
    SubscriptionUpdate, TransportError, WriteOp,
    batch::{WriteBatch, validate_batch},
    store::DocumentStore,
};

#[derive(Default)]
struct Shared {
    collections: HashMap<CollectionPath, BTreeMap<String, Value>>,
    subscribers: HashMap<CollectionPath, Vec<mpsc::UnboundedSender<SubscriptionUpdate>>>,
}

impl Shared {
    fn snapshot_of(&self, collection: &CollectionPath) -> CollectionSnapshot {
        let documents = self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default();

        CollectionSnapshot {
            collection: collection.clone(),
            documents,
        }
    }

    /// Pushes a fresh snapshot to every live subscriber of a collection,
    /// pruning subscribers that have gone away.
    fn publish(&mut self, collection: &CollectionPath) {
        let snapshot = self.snapshot_of(collection);
        if let Some(subscribers) = self.subscribers.get_mut(collection) {
            subscribers.retain(|tx| tx.send(Ok(snapshot.clone())).is_ok());
        }
    }
}

/// In-memory document store implementation.
///
/// Provides the full store contract — atomic batches and live
/// subscriptions included — backed by process memory. Snapshots are
/// published under the same write guard that applies the batch, so
/// subscribers never observe a partially applied commit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<RwLock<Shared>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of documents across all collections.
    pub async fn doc_count(&self) -> usize {
        let shared = self.shared.read().await;
        shared.collections.values().map(|docs| docs.len()).sum()
    }

    /// Clears all documents. Subscribers are left in place.
    pub async fn clear(&self) {
        let mut shared = self.shared.write().await;
        let collections: Vec<_> = shared.collections.keys().cloned().collect();
        shared.collections.clear();
        for collection in collections {
            shared.publish(&collection);
        }
    }

    /// Injects a transport fault into every live subscriber of a
    /// collection. The feed continues afterwards.
    pub async fn fail_subscribers(&self, collection: &CollectionPath, message: &str) {
        let mut shared = self.shared.write().await;
        if let Some(subscribers) = shared.subscribers.get_mut(collection) {
            let error = TransportError {
                message: message.to_string(),
            };
            subscribers.retain(|tx| tx.send(Err(error.clone())).is_ok());
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, doc: &DocumentPath) -> Result<Option<Document>> {
        let shared = self.shared.read().await;
        Ok(shared
            .collections
            .get(doc.collection())
            .and_then(|docs| docs.get(doc.id()))
            .map(|data| Document::new(doc.id(), data.clone())))
    }

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>> {
        let shared = self.shared.read().await;
        Ok(shared.snapshot_of(collection).documents)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        validate_batch(&batch)?;

        let mut shared = self.shared.write().await;

        // Reject the whole batch before applying anything: an update op
        // must target a document that exists right now.
        for op in batch.ops() {
            if let WriteOp::Update { doc, .. } = op {
                let exists = shared
                    .collections
                    .get(doc.collection())
                    .is_some_and(|docs| docs.contains_key(doc.id()));
                if !exists {
                    return Err(StoreError::NotFound(doc.clone()));
                }
            }
        }

        let op_count = batch.len();
        let mut touched: Vec<CollectionPath> = Vec::new();
        for op in batch.into_ops() {
            let collection = op.doc().collection().clone();
            match op {
                WriteOp::Put { doc, data } => {
                    shared
                        .collections
                        .entry(collection.clone())
                        .or_default()
                        .insert(doc.id().to_string(), data);
                }
                WriteOp::Merge { doc, fields } => {
                    let target = shared
                        .collections
                        .entry(collection.clone())
                        .or_default()
                        .entry(doc.id().to_string())
                        .or_insert_with(|| Value::Object(Default::default()));
                    merge_fields(target, fields);
                }
                WriteOp::Update { doc, fields } => {
                    // Existence checked above under the same guard.
                    if let Some(target) = shared
                        .collections
                        .get_mut(&collection)
                        .and_then(|docs| docs.get_mut(doc.id()))
                    {
                        merge_fields(target, fields);
                    }
                }
                WriteOp::Delete { doc } => {
                    if let Some(docs) = shared.collections.get_mut(&collection) {
                        docs.remove(doc.id());
                    }
                }
            }
            if !touched.contains(&collection) {
                touched.push(collection);
            }
        }

        // Publish while still holding the guard so every subscriber sees
        // the batch as one unit.
        for collection in &touched {
            shared.publish(collection);
        }

        metrics::counter!("store_commits").increment(1);
        tracing::debug!(ops = op_count, collections = touched.len(), "batch committed");

        Ok(())
    }

    async fn subscribe(&self, collection: &CollectionPath) -> Result<Subscription> {
        let mut shared = self.shared.write().await;
        let (tx, rx) = mpsc::unbounded_channel();

        // The receiver is still in scope, so the send cannot fail.
        let _ = tx.send(Ok(shared.snapshot_of(collection)));

        shared
            .subscribers
            .entry(collection.clone())
            .or_default()
            .push(tx);

        Ok(Subscription::new(collection.clone(), rx))
    }
}

/// Shallow-merges top-level fields into a target object.
fn merge_fields(target: &mut Value, fields: Value) {
    if let (Value::Object(target), Value::Object(fields)) = (target, fields) {
        for (key, value) in fields {
            target.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStoreExt;
    use common::CustomerId;

    fn widgets() -> CollectionPath {
        CollectionPath::public("widgets")
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let store = MemoryStore::new();
        let doc = widgets().doc("w-1");

        store
            .put(&doc, serde_json::json!({"name": "gear"}))
            .await
            .unwrap();

        let stored = store.get(&doc).await.unwrap().unwrap();
        assert_eq!(stored.id, "w-1");
        assert_eq!(stored.data, serde_json::json!({"name": "gear"}));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = MemoryStore::new();
        let result = store.get(&widgets().doc("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn list_returns_documents_ordered_by_id() {
        let store = MemoryStore::new();
        store
            .put(&widgets().doc("b"), serde_json::json!({"n": 2}))
            .await
            .unwrap();
        store
            .put(&widgets().doc("a"), serde_json::json!({"n": 1}))
            .await
            .unwrap();

        let docs = store.list(&widgets()).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[1].id, "b");
    }

    #[tokio::test]
    async fn merge_creates_missing_document() {
        let store = MemoryStore::new();
        let doc = widgets().doc("w-1");

        store
            .merge(&doc, serde_json::json!({"count": 3}))
            .await
            .unwrap();

        let stored = store.get(&doc).await.unwrap().unwrap();
        assert_eq!(stored.data, serde_json::json!({"count": 3}));
    }

    #[tokio::test]
    async fn merge_keeps_unrelated_fields() {
        let store = MemoryStore::new();
        let doc = widgets().doc("w-1");

        store
            .put(&doc, serde_json::json!({"name": "gear", "count": 1}))
            .await
            .unwrap();
        store
            .merge(&doc, serde_json::json!({"count": 5}))
            .await
            .unwrap();

        let stored = store.get(&doc).await.unwrap().unwrap();
        assert_eq!(stored.data, serde_json::json!({"name": "gear", "count": 5}));
    }

    #[tokio::test]
    async fn update_missing_document_rejects_whole_batch() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch
            .put(widgets().doc("a"), serde_json::json!({"n": 1}))
            .update(widgets().doc("missing"), serde_json::json!({"n": 2}));

        let result = store.commit(batch).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));

        // The valid put in the same batch must not have landed.
        assert!(store.get(&widgets().doc("a")).await.unwrap().is_none());
        assert_eq!(store.doc_count().await, 0);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let doc = widgets().doc("w-1");

        store.put(&doc, serde_json::json!({"n": 1})).await.unwrap();
        store.delete(&doc).await.unwrap();
        store.delete(&doc).await.unwrap();

        assert!(store.get(&doc).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn batch_spanning_collections_applies_everywhere() {
        let store = MemoryStore::new();
        let customer = CustomerId::new("anon-1");
        let cart = CollectionPath::customer(&customer, "cart");

        let mut batch = WriteBatch::new();
        batch
            .put(widgets().doc("w-1"), serde_json::json!({"n": 1}))
            .put(cart.doc("w-1"), serde_json::json!({"quantity": 2}));
        store.commit(batch).await.unwrap();

        assert!(store.get(&widgets().doc("w-1")).await.unwrap().is_some());
        assert!(store.get(&cart.doc("w-1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn subscribe_yields_current_snapshot_first() {
        let store = MemoryStore::new();
        store
            .put(&widgets().doc("w-1"), serde_json::json!({"n": 1}))
            .await
            .unwrap();

        let mut sub = store.subscribe(&widgets()).await.unwrap();
        let snapshot = sub.next().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.documents[0].id, "w-1");
    }

    #[tokio::test]
    async fn subscriber_sees_batch_as_one_snapshot() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe(&widgets()).await.unwrap();
        assert!(sub.next().await.unwrap().unwrap().is_empty());

        let mut batch = WriteBatch::new();
        batch
            .put(widgets().doc("a"), serde_json::json!({"n": 1}))
            .put(widgets().doc("b"), serde_json::json!({"n": 2}));
        store.commit(batch).await.unwrap();

        // One commit, one snapshot, both documents present.
        let snapshot = sub.next().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    #[tokio::test]
    async fn injected_fault_does_not_end_the_feed() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe(&widgets()).await.unwrap();
        sub.next().await.unwrap().unwrap();

        store.fail_subscribers(&widgets(), "connection reset").await;
        let update = sub.next().await.unwrap();
        assert!(update.is_err());

        store
            .put(&widgets().doc("a"), serde_json::json!({"n": 1}))
            .await
            .unwrap();
        let snapshot = sub.next().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn dropped_subscription_is_pruned() {
        let store = MemoryStore::new();
        let sub = store.subscribe(&widgets()).await.unwrap();
        sub.unsubscribe();

        store
            .put(&widgets().doc("a"), serde_json::json!({"n": 1}))
            .await
            .unwrap();

        let shared = store.shared.read().await;
        assert!(shared.subscribers.get(&widgets()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn subscription_works_as_a_stream() {
        use futures_util::StreamExt;

        let store = MemoryStore::new();
        let mut sub = store.subscribe(&widgets()).await.unwrap();

        let first = StreamExt::next(&mut sub).await.unwrap().unwrap();
        assert!(first.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_documents_and_notifies() {
        let store = MemoryStore::new();
        store
            .put(&widgets().doc("a"), serde_json::json!({"n": 1}))
            .await
            .unwrap();

        let mut sub = store.subscribe(&widgets()).await.unwrap();
        sub.next().await.unwrap().unwrap();

        store.clear().await;
        assert_eq!(store.doc_count().await, 0);

        let snapshot = sub.next().await.unwrap().unwrap();
        assert!(snapshot.is_empty());
    }
}
