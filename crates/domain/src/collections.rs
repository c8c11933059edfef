//! The persisted-record addressing scheme.
//!
//! Collections are partitioned strictly into the public (admin/shared)
//! namespace and per-customer private namespaces. Every order write
//! touches exactly one document in each of the two order collections
//! below; the repository is the only place allowed to build those
//! paths.

use common::CustomerId;
use doc_store::{CollectionPath, DocumentPath};

/// The public product catalog.
pub fn products() -> CollectionPath {
    CollectionPath::public("products")
}

/// The payment-configuration singleton document.
pub fn payment_info() -> DocumentPath {
    CollectionPath::public("settings").doc("payment-info")
}

/// A customer's private cart lines, keyed by product ID.
pub fn cart(customer: &CustomerId) -> CollectionPath {
    CollectionPath::customer(customer, "cart")
}

/// A customer's private (owner-scoped) orders.
pub fn orders(customer: &CustomerId) -> CollectionPath {
    CollectionPath::customer(customer, "orders")
}

/// The admin-scoped mirror of every order.
pub fn all_orders() -> CollectionPath {
    CollectionPath::public("all-orders")
}

/// The public append-only notification log.
pub fn notifications() -> CollectionPath {
    CollectionPath::public("notifications")
}
