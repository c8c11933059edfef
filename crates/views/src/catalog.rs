//! Catalog synchronizer: seed on first boot, then republish derived
//! views on every catalog update.

use doc_store::DocumentStore;
use domain::{CatalogService, Product, collections};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::mirror::{Mirror, SyncNotice};

/// Mirrors the product collection and derives two views from every
/// snapshot: the unfiltered catalog and the active subset shown on the
/// storefront.
pub struct CatalogSync {
    products: Mirror<Product>,
    active_rx: watch::Receiver<Vec<Product>>,
    derive_task: JoinHandle<()>,
}

impl CatalogSync {
    /// Seeds the catalog if it is empty, then starts mirroring it.
    pub async fn start<S: DocumentStore + Clone>(store: &S) -> Result<Self> {
        CatalogService::new(store.clone()).ensure_seeded().await?;

        let products = Mirror::start(store, collections::products()).await?;

        let mut all_rx = products.watch();
        let (active_tx, active_rx) = watch::channel(filter_active(&all_rx.borrow()));
        let derive_task = tokio::spawn(async move {
            while all_rx.changed().await.is_ok() {
                let active = filter_active(&all_rx.borrow());
                if active_tx.send(active).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            products,
            active_rx,
            derive_task,
        })
    }

    /// Returns the full catalog, active or not.
    pub fn all(&self) -> Vec<Product> {
        self.products.current()
    }

    /// Returns the products currently visible on the storefront.
    pub fn active(&self) -> Vec<Product> {
        self.active_rx.borrow().clone()
    }

    /// Returns the distinct categories of active products, in first-seen
    /// order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.active_rx.borrow().iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Watches the unfiltered catalog view.
    pub fn watch_all(&self) -> watch::Receiver<Vec<Product>> {
        self.products.watch()
    }

    /// Watches the active-only view.
    pub fn watch_active(&self) -> watch::Receiver<Vec<Product>> {
        self.active_rx.clone()
    }

    /// Returns a receiver for non-fatal sync notices.
    pub fn notices(&self) -> broadcast::Receiver<SyncNotice> {
        self.products.notices()
    }
}

impl Drop for CatalogSync {
    fn drop(&mut self) {
        self.derive_task.abort();
    }
}

fn filter_active(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|product| product.is_active)
        .cloned()
        .collect()
}
