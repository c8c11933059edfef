//! Checkout transaction coordination.

use chrono::Utc;
use common::{CustomerId, OrderId};
use doc_store::{DocumentStore, WriteBatch};
use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, CartService};
use crate::collections;
use crate::error::{DomainError, ValidationError};
use crate::gateway::Attachment;
use crate::value_objects::Money;

use super::{Order, OrderRepository, OrderStatus, PaymentMethod, ShippingAddress};

/// Fixed storefront currency tag recorded on every order.
pub const CURRENCY: &str = "ARS";

/// Flat shipping fee in minor units, applied only when the subtotal is
/// positive.
pub const SHIPPING_FEE: Money = Money::from_cents(1_000_000);

/// Sums line totals over a cart snapshot.
pub fn subtotal(items: &[CartItem]) -> Money {
    items
        .iter()
        .fold(Money::zero(), |acc, line| acc + line.line_total())
}

/// Computes the frozen order total from a subtotal.
pub fn order_total(subtotal: Money) -> Money {
    if subtotal.is_positive() {
        subtotal + SHIPPING_FEE
    } else {
        subtotal
    }
}

/// The typed checkout submission, validated before it reaches the
/// coordinator's write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub shipping: ShippingAddress,
    pub payment_method: PaymentMethod,

    /// Encoded proof-of-payment image. Required: checkout is blocked
    /// locally without it.
    pub receipt: Attachment,
}

impl CheckoutRequest {
    /// Rejects the request if any required input is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.shipping.validate()?;
        if self.receipt.is_empty() {
            return Err(ValidationError::MissingReceipt);
        }
        Ok(())
    }
}

/// Turns a customer's cart into an order with one atomic commit.
pub struct CheckoutCoordinator<S: DocumentStore> {
    cart: CartService<S>,
    repo: OrderRepository<S>,
}

impl<S: DocumentStore + Clone> CheckoutCoordinator<S> {
    /// Creates a new coordinator over the given store.
    pub fn new(store: S) -> Self {
        Self {
            cart: CartService::new(store.clone()),
            repo: OrderRepository::new(store),
        }
    }

    /// Places an order from the customer's current cart.
    ///
    /// One atomic commit inserts the owner-scoped copy, inserts the
    /// admin-scoped copy and deletes every cart line. On success the
    /// returned aggregate is exactly what was persisted and the cart is
    /// empty; on failure nothing changed anywhere, so a retry is safe.
    /// There is no idempotency key: a retry after an ambiguous
    /// transport outcome can place a second order.
    #[tracing::instrument(skip(self, customer, request), fields(customer = %customer))]
    pub async fn place_order(
        &self,
        customer: &CustomerId,
        request: CheckoutRequest,
    ) -> Result<Order, DomainError> {
        request.validate()?;

        let items = self.cart.items(customer).await?;
        if items.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let total = order_total(subtotal(&items));
        let created_at = Utc::now();
        let order = Order {
            id: OrderId::new(),
            reference: format!("ORD-{}", created_at.timestamp_millis()),
            customer_id: customer.clone(),
            items,
            shipping: request.shipping,
            total,
            currency: CURRENCY.to_string(),
            payment_method: request.payment_method,
            receipt: request.receipt,
            status: OrderStatus::PendingConfirmation,
            tracking: None,
            created_at,
        };

        let mut batch = WriteBatch::new();
        self.repo.stage_place(&mut batch, &order)?;
        let cart = collections::cart(customer);
        for line in &order.items {
            batch.delete(cart.doc(line.product_id.as_str()));
        }
        self.repo.commit(batch).await?;

        metrics::counter!("orders_placed").increment(1);
        tracing::info!(
            order_id = %order.id,
            reference = %order.reference,
            total = %order.total,
            "order placed"
        );

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ProductId;

    fn line(id: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Money::from_cents(cents),
            image_url: String::new(),
            quantity,
        }
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let items = vec![line("a", 1000, 2), line("b", 500, 3)];
        assert_eq!(subtotal(&items), Money::from_cents(3500));
    }

    #[test]
    fn fee_applies_only_to_positive_subtotals() {
        assert_eq!(order_total(Money::zero()), Money::zero());
        assert_eq!(
            order_total(Money::from_cents(100)),
            Money::from_cents(100) + SHIPPING_FEE
        );
    }

    #[test]
    fn flagship_price_total() {
        // One item at 89999.99: fee applies, total is frozen from this.
        let items = vec![line("headphones", 8_999_999, 1)];
        let total = order_total(subtotal(&items));
        assert_eq!(total, Money::from_cents(9_999_999));
    }

    #[test]
    fn request_without_receipt_is_rejected() {
        let request = CheckoutRequest {
            shipping: super::super::tests::sample_address(),
            payment_method: PaymentMethod::BankTransfer,
            receipt: Attachment {
                file_name: String::new(),
                data: String::new(),
            },
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::MissingReceipt)
        ));
    }

    #[test]
    fn request_with_blank_address_field_is_rejected() {
        let mut shipping = super::super::tests::sample_address();
        shipping.email = String::new();
        let request = CheckoutRequest {
            shipping,
            payment_method: PaymentMethod::BankTransfer,
            receipt: Attachment {
                file_name: "receipt.jpg".to_string(),
                data: "ZGF0YQ==".to_string(),
            },
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::MissingField { field: "email" })
        ));
    }
}
