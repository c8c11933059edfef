//! Domain layer for the storefront sync engine.
//!
//! This crate provides the transactional core over the document store:
//! - Catalog administration and first-boot seeding
//! - Per-customer cart aggregation with frozen-at-add-time line snapshots
//! - The checkout transaction coordinator (atomic order creation)
//! - The forward-only order lifecycle state machine with notification
//!   side effects committed in the same batch
//! - Gateway traits for the identity provider and attachment encoder

pub mod cart;
pub mod catalog;
pub mod collections;
pub mod error;
pub mod gateway;
pub mod notification;
pub mod order;
pub mod payment;
pub mod value_objects;

pub use cart::{CartItem, CartService};
pub use catalog::{CatalogService, Product, ProductDraft, seed_product};
pub use error::{DomainError, ValidationError};
pub use gateway::{
    ATTACHMENT_QUALITY, Attachment, AttachmentEncoder, IdentityProvider,
    MAX_ATTACHMENT_DIMENSION, PassthroughEncoder, StaticIdentity,
};
pub use notification::{Notification, NotificationEmitter};
pub use order::{
    CURRENCY, CheckoutCoordinator, CheckoutRequest, Order, OrderLifecycle, OrderRepository,
    OrderStatus, PaymentMethod, SHIPPING_FEE, ShippingAddress, Tracking, TrackingUpdate,
};
pub use payment::{PaymentInfo, PaymentSettings};
pub use value_objects::{Money, ProductId};
