//! Per-customer cart aggregation.

use common::CustomerId;
use doc_store::{DocumentStore, DocumentStoreExt};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::collections;
use crate::error::{DomainError, ValidationError};
use crate::value_objects::{Money, ProductId};

/// One cart line, scoped to a single customer and keyed by product ID.
///
/// Carries a snapshot of the product's display fields taken when the
/// line was created; the price is deliberately not re-synced if the
/// catalog price changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image_url: String,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshots a product's display fields into a new line.
    pub fn snapshot_of(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            quantity,
        }
    }

    /// Returns quantity times unit price.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// Maintains a customer's cart lines in the store.
pub struct CartService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> CartService<S> {
    /// Creates a new cart service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds a product to the cart, merging into an existing line.
    ///
    /// If a line for the product already exists, its quantity becomes
    /// `existing + quantity`; otherwise a new line is created from a
    /// snapshot of the product. The read and the write are separate
    /// store calls: two concurrent adds of the same product can both
    /// read the old quantity and the later write wins, losing one
    /// increment. That race is accepted, not fixed here.
    #[tracing::instrument(skip(self, customer, product), fields(customer = %customer, product_id = %product.id))]
    pub async fn add_item(
        &self,
        customer: &CustomerId,
        product: &Product,
        quantity: u32,
    ) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity { quantity }.into());
        }

        let doc = collections::cart(customer).doc(product.id.as_str());
        match self.store.get(&doc).await? {
            Some(existing) => {
                let line: CartItem = existing.decode()?;
                let merged = line.quantity + quantity;
                self.store
                    .merge(&doc, serde_json::json!({ "quantity": merged }))
                    .await?;
                tracing::debug!(quantity = merged, "cart line merged");
            }
            None => {
                let line = CartItem::snapshot_of(product, quantity);
                self.store.put(&doc, serde_json::to_value(&line)?).await?;
                tracing::debug!(quantity, "cart line created");
            }
        }

        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// Quantities below 1 are ignored without writing anything.
    #[tracing::instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        customer: &CustomerId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), DomainError> {
        if quantity < 1 {
            tracing::debug!("ignoring quantity below 1");
            return Ok(());
        }

        let doc = collections::cart(customer).doc(product_id.as_str());
        self.store
            .merge(&doc, serde_json::json!({ "quantity": quantity }))
            .await?;
        Ok(())
    }

    /// Removes a line. A missing line is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(
        &self,
        customer: &CustomerId,
        product_id: &ProductId,
    ) -> Result<(), DomainError> {
        let doc = collections::cart(customer).doc(product_id.as_str());
        self.store.delete(&doc).await?;
        Ok(())
    }

    /// Reads the customer's current cart lines.
    pub async fn items(&self, customer: &CustomerId) -> Result<Vec<CartItem>, DomainError> {
        let docs = self.store.list(&collections::cart(customer)).await?;
        docs.iter()
            .map(|doc| doc.decode().map_err(DomainError::from))
            .collect()
    }
}
