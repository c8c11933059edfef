//! Dual-copy order repository.
//!
//! An order is one logical aggregate stored in two namespaces: the
//! owner-scoped copy and the admin-scoped copy. This repository is the
//! only place that builds order document paths, and every staging
//! method touches both copies, so no caller can write one without the
//! other.

use common::{CustomerId, OrderId};
use doc_store::{DocumentPath, DocumentStore, WriteBatch};
use serde_json::Value;

use crate::collections;
use crate::error::DomainError;

use super::Order;

/// Stages and commits writes that keep both order copies identical.
pub struct OrderRepository<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> OrderRepository<S> {
    /// Creates a new repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn owner_doc(customer: &CustomerId, id: OrderId) -> DocumentPath {
        collections::orders(customer).doc(id.to_string())
    }

    fn admin_doc(id: OrderId) -> DocumentPath {
        collections::all_orders().doc(id.to_string())
    }

    /// Stages the creation of both copies of a new order.
    pub fn stage_place(&self, batch: &mut WriteBatch, order: &Order) -> Result<(), DomainError> {
        let data = serde_json::to_value(order)?;
        batch.put(Self::owner_doc(&order.customer_id, order.id), data.clone());
        batch.put(Self::admin_doc(order.id), data);
        Ok(())
    }

    /// Stages a field update on both copies of an existing order.
    ///
    /// Fails the whole commit if either copy is missing.
    pub fn stage_update(
        &self,
        batch: &mut WriteBatch,
        customer: &CustomerId,
        id: OrderId,
        fields: Value,
    ) {
        batch.update(Self::owner_doc(customer, id), fields.clone());
        batch.update(Self::admin_doc(id), fields);
    }

    /// Stages the deletion of both copies.
    pub fn stage_delete(&self, batch: &mut WriteBatch, customer: &CustomerId, id: OrderId) {
        batch.delete(Self::owner_doc(customer, id));
        batch.delete(Self::admin_doc(id));
    }

    /// Commits a staged batch atomically.
    pub async fn commit(&self, batch: WriteBatch) -> Result<(), DomainError> {
        self.store.commit(batch).await?;
        Ok(())
    }

    /// Reads the owner-scoped copy.
    pub async fn find_for_customer(
        &self,
        customer: &CustomerId,
        id: OrderId,
    ) -> Result<Option<Order>, DomainError> {
        match self.store.get(&Self::owner_doc(customer, id)).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Reads the admin-scoped copy.
    pub async fn find_admin(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        match self.store.get(&Self::admin_doc(id)).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }
}
