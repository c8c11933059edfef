//! Product catalog: admin CRUD and first-boot seeding.

use chrono::{DateTime, Utc};
use doc_store::{DocumentStore, DocumentStoreExt};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collections;
use crate::error::{DomainError, ValidationError};
use crate::value_objects::{Money, ProductId};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier; also the document ID.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Long-form description.
    pub description: String,

    /// Unit price in minor units. Never negative.
    pub price: Money,

    /// Free-text category label.
    pub category: String,

    /// Display image location.
    pub image_url: String,

    /// Gates storefront visibility; inactive products stay in the
    /// catalog but are hidden from the active view.
    pub is_active: bool,

    /// When the product was added.
    pub created_at: DateTime<Utc>,
}

/// Fields of a product before it has an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub image_url: String,
    pub is_active: bool,
}

impl ProductDraft {
    /// Validates the draft before it reaches the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_listing(&self.name, self.price)
    }
}

fn validate_listing(name: &str, price: Money) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }
    if price.is_negative() {
        return Err(ValidationError::InvalidPrice {
            cents: price.cents(),
        });
    }
    Ok(())
}

/// The product inserted on first boot so the storefront is never empty.
pub fn seed_product() -> ProductDraft {
    ProductDraft {
        name: "THUNDER-BASS Headphones".to_string(),
        description: "Flagship over-ear headphones with active noise cancelling, \
                      30-hour battery life and an ultralight build. Great for \
                      music, podcasts and calls."
            .to_string(),
        price: Money::from_cents(8_999_999),
        category: "Audio".to_string(),
        image_url: "https://placehold.co/600x400/4f46e5/ffffff?text=THUNDER-BASS".to_string(),
        is_active: true,
    }
}

/// Admin-side service for managing the catalog.
pub struct CatalogService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> CatalogService<S> {
    /// Creates a new catalog service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds a product, allocating its identity.
    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        draft.validate()?;

        let product = Product {
            id: ProductId::new(Uuid::new_v4().to_string()),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image_url: draft.image_url,
            is_active: draft.is_active,
            created_at: Utc::now(),
        };

        let doc = collections::products().doc(product.id.as_str());
        self.store.put(&doc, serde_json::to_value(&product)?).await?;

        tracing::info!(product_id = %product.id, "product added");
        Ok(product)
    }

    /// Replaces an existing product's fields.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn update_product(&self, product: &Product) -> Result<(), DomainError> {
        validate_listing(&product.name, product.price)?;

        let doc = collections::products().doc(product.id.as_str());
        self.store.put(&doc, serde_json::to_value(product)?).await?;
        Ok(())
    }

    /// Shows or hides a product on the storefront.
    #[tracing::instrument(skip(self))]
    pub async fn set_active(&self, id: &ProductId, active: bool) -> Result<(), DomainError> {
        let doc = collections::products().doc(id.as_str());
        self.store
            .update(&doc, serde_json::json!({ "is_active": active }))
            .await?;
        Ok(())
    }

    /// Removes a product from the catalog.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), DomainError> {
        let doc = collections::products().doc(id.as_str());
        self.store.delete(&doc).await?;
        Ok(())
    }

    /// Reads a single product.
    pub async fn find(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let doc = collections::products().doc(id.as_str());
        match self.store.get(&doc).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Inserts the seed product if the catalog is empty.
    ///
    /// Returns true if a seed was inserted. Not compare-and-set
    /// protected: concurrent first boots can double-seed.
    #[tracing::instrument(skip(self))]
    pub async fn ensure_seeded(&self) -> Result<bool, DomainError> {
        let existing = self.store.list(&collections::products()).await?;
        if !existing.is_empty() {
            return Ok(false);
        }

        tracing::info!("catalog is empty, inserting seed product");
        self.add_product(seed_product()).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_store::MemoryStore;

    fn draft(name: &str, cents: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: "A widget".to_string(),
            price: Money::from_cents(cents),
            category: "Widgets".to_string(),
            image_url: "https://example.com/widget.jpg".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn add_and_find_product() {
        let service = CatalogService::new(MemoryStore::new());
        let product = service.add_product(draft("Widget", 1000)).await.unwrap();

        let found = service.find(&product.id).await.unwrap().unwrap();
        assert_eq!(found, product);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = CatalogService::new(MemoryStore::new());
        let result = service.add_product(draft("   ", 1000)).await;
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::BlankName))
        ));
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let service = CatalogService::new(MemoryStore::new());
        let result = service.add_product(draft("Widget", -1)).await;
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::InvalidPrice { .. }))
        ));
    }

    #[tokio::test]
    async fn zero_price_is_allowed() {
        let service = CatalogService::new(MemoryStore::new());
        assert!(service.add_product(draft("Freebie", 0)).await.is_ok());
    }

    #[tokio::test]
    async fn set_active_flips_visibility_only() {
        let service = CatalogService::new(MemoryStore::new());
        let product = service.add_product(draft("Widget", 1000)).await.unwrap();

        service.set_active(&product.id, false).await.unwrap();

        let found = service.find(&product.id).await.unwrap().unwrap();
        assert!(!found.is_active);
        assert_eq!(found.name, product.name);
        assert_eq!(found.price, product.price);
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let service = CatalogService::new(MemoryStore::new());
        let product = service.add_product(draft("Widget", 1000)).await.unwrap();

        service.delete_product(&product.id).await.unwrap();
        assert!(service.find(&product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeds_empty_catalog_once() {
        let store = MemoryStore::new();
        let service = CatalogService::new(store.clone());

        assert!(service.ensure_seeded().await.unwrap());
        assert!(!service.ensure_seeded().await.unwrap());

        let docs = store.list(&collections::products()).await.unwrap();
        assert_eq!(docs.len(), 1);

        let seeded: Product = docs[0].decode().unwrap();
        assert_eq!(seeded.price, Money::from_cents(8_999_999));
        assert!(seeded.is_active);
    }

    #[tokio::test]
    async fn does_not_seed_populated_catalog() {
        let service = CatalogService::new(MemoryStore::new());
        service.add_product(draft("Widget", 1000)).await.unwrap();
        assert!(!service.ensure_seeded().await.unwrap());
    }
}
