//! Live read models for the storefront sync engine.
//!
//! Each view subscribes to one collection and reconciles a local cache
//! against the store's push feed:
//! - [`Mirror`] — generic full-snapshot mirror
//! - [`CatalogSync`] — seed-on-first-boot plus derived all/active views
//! - [`CartMirror`], [`CustomerOrdersMirror`], [`AdminOrdersMirror`],
//!   [`NotificationFeed`] — typed mirrors with domain query helpers
//!
//! Every pushed snapshot replaces the previous state wholesale; on a
//! transport fault the last-known-good view is retained and a
//! [`SyncNotice`] is broadcast to the caller.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod mirror;
pub mod notifications;
pub mod orders;

pub use cart::CartMirror;
pub use catalog::CatalogSync;
pub use error::{Result, ViewError};
pub use mirror::{Mirror, SyncNotice};
pub use notifications::NotificationFeed;
pub use orders::{AdminOrdersMirror, CustomerOrdersMirror};
