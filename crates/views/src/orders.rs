//! Order feeds: the customer's own orders and the admin mirror.

use common::{CustomerId, OrderId};
use doc_store::DocumentStore;
use domain::{Order, collections};
use tokio::sync::{broadcast, watch};

use crate::error::Result;
use crate::mirror::{Mirror, SyncNotice};

fn recent_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

/// Mirrors one customer's owner-scoped orders.
pub struct CustomerOrdersMirror {
    mirror: Mirror<Order>,
}

impl CustomerOrdersMirror {
    /// Starts mirroring a customer's orders.
    pub async fn start<S: DocumentStore>(store: &S, customer: &CustomerId) -> Result<Self> {
        Ok(Self {
            mirror: Mirror::start(store, collections::orders(customer)).await?,
        })
    }

    /// Returns the customer's orders in store order.
    pub fn orders(&self) -> Vec<Order> {
        self.mirror.current()
    }

    /// Returns the customer's orders, newest first.
    pub fn recent_first(&self) -> Vec<Order> {
        recent_first(self.mirror.current())
    }

    /// Finds one order by ID.
    pub fn find(&self, id: OrderId) -> Option<Order> {
        self.mirror.current().into_iter().find(|o| o.id == id)
    }

    /// Watches the order list.
    pub fn watch(&self) -> watch::Receiver<Vec<Order>> {
        self.mirror.watch()
    }

    /// Returns a receiver for non-fatal sync notices.
    pub fn notices(&self) -> broadcast::Receiver<SyncNotice> {
        self.mirror.notices()
    }
}

/// Mirrors the admin-scoped collection of every order.
pub struct AdminOrdersMirror {
    mirror: Mirror<Order>,
}

impl AdminOrdersMirror {
    /// Starts mirroring the admin order index.
    pub async fn start<S: DocumentStore>(store: &S) -> Result<Self> {
        Ok(Self {
            mirror: Mirror::start(store, collections::all_orders()).await?,
        })
    }

    /// Returns every order in store order.
    pub fn orders(&self) -> Vec<Order> {
        self.mirror.current()
    }

    /// Returns every order, newest first (the admin table order).
    pub fn recent_first(&self) -> Vec<Order> {
        recent_first(self.mirror.current())
    }

    /// Finds one order by ID.
    pub fn find(&self, id: OrderId) -> Option<Order> {
        self.mirror.current().into_iter().find(|o| o.id == id)
    }

    /// Watches the order list.
    pub fn watch(&self) -> watch::Receiver<Vec<Order>> {
        self.mirror.watch()
    }

    /// Returns a receiver for non-fatal sync notices.
    pub fn notices(&self) -> broadcast::Receiver<SyncNotice> {
        self.mirror.notices()
    }
}
