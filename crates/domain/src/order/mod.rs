//! Orders: the aggregate, its dual-copy repository, the checkout
//! transaction coordinator and the lifecycle state machine.

mod checkout;
mod lifecycle;
mod repository;
mod status;

pub use checkout::{CURRENCY, CheckoutCoordinator, CheckoutRequest, SHIPPING_FEE, order_total, subtotal};
pub use lifecycle::{OrderLifecycle, TrackingUpdate};
pub use repository::OrderRepository;
pub use status::OrderStatus;

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::error::ValidationError;
use crate::gateway::Attachment;
use crate::value_objects::Money;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Manual bank transfer, verified by a human reviewing the
    /// uploaded proof of payment.
    #[serde(rename = "transfer")]
    BankTransfer,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::BankTransfer => write!(f, "transfer"),
        }
    }
}

/// Shipping destination. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub national_id: String,
    pub locality: String,
    pub region: String,
    pub phone: String,
    pub email: String,
}

impl ShippingAddress {
    /// Rejects the address if any field is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields: [(&'static str, &str); 6] = [
            ("full_name", &self.full_name),
            ("national_id", &self.national_id),
            ("locality", &self.locality),
            ("region", &self.region),
            ("phone", &self.phone),
            ("email", &self.email),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// Carrier tracking details attached once an order ships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracking {
    /// Carrier tracking number. Never blank once set.
    pub number: String,

    /// Optional scanned shipping guide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

/// An order aggregate.
///
/// Stored simultaneously in the owner-scoped and admin-scoped
/// collections; the two copies are written only together and stay
/// field-identical at all observable times. Items and total are frozen
/// at checkout and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,

    /// Human-readable, timestamp-derived reference (`ORD-<millis>`).
    pub reference: String,

    pub customer_id: CustomerId,

    /// Immutable snapshot of the cart lines at commit time.
    pub items: Vec<CartItem>,

    pub shipping: ShippingAddress,

    /// Frozen at checkout: subtotal plus the flat shipping fee.
    pub total: Money,

    /// Fixed storefront currency tag.
    pub currency: String,

    pub payment_method: PaymentMethod,

    /// Uploaded proof of payment.
    pub receipt: Attachment,

    pub status: OrderStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<Tracking>,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the digits of the reference after the `ORD-` prefix.
    pub fn short_reference(&self) -> &str {
        self.reference
            .split_once('-')
            .map(|(_, digits)| digits)
            .unwrap_or(&self.reference)
    }

    /// Returns the total quantity across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}
