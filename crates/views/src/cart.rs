//! Per-customer cart mirror.

use common::CustomerId;
use doc_store::DocumentStore;
use domain::order::subtotal;
use domain::{CartItem, Money, collections};
use tokio::sync::{broadcast, watch};

use crate::error::Result;
use crate::mirror::{Mirror, SyncNotice};

/// Mirrors one customer's cart lines.
pub struct CartMirror {
    mirror: Mirror<CartItem>,
}

impl CartMirror {
    /// Starts mirroring a customer's cart.
    pub async fn start<S: DocumentStore>(store: &S, customer: &CustomerId) -> Result<Self> {
        Ok(Self {
            mirror: Mirror::start(store, collections::cart(customer)).await?,
        })
    }

    /// Returns the current cart lines.
    pub fn items(&self) -> Vec<CartItem> {
        self.mirror.current()
    }

    /// Returns the total quantity across all lines (the cart badge).
    pub fn item_count(&self) -> u32 {
        self.mirror
            .current()
            .iter()
            .map(|line| line.quantity)
            .sum()
    }

    /// Returns the sum of line totals.
    pub fn subtotal(&self) -> Money {
        subtotal(&self.mirror.current())
    }

    /// Watches the cart lines.
    pub fn watch(&self) -> watch::Receiver<Vec<CartItem>> {
        self.mirror.watch()
    }

    /// Returns a receiver for non-fatal sync notices.
    pub fn notices(&self) -> broadcast::Receiver<SyncNotice> {
        self.mirror.notices()
    }
}
