//! Order fulfillment status machine.

use serde::{Deserialize, Serialize};

/// The fulfillment status of an order.
///
/// Transitions are strictly forward, no skipping:
/// ```text
/// PendingConfirmation ──► Processing ──► Shipped
/// ```
/// Deleting an order is not a transition; it is allowed from any
/// status and removes the order entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Initial status: awaiting manual verification of the uploaded
    /// proof of payment.
    #[default]
    PendingConfirmation,

    /// Payment confirmed, order is being prepared.
    Processing,

    /// Handed to the carrier (terminal for status purposes; tracking
    /// details remain editable in place).
    Shipped,
}

impl OrderStatus {
    /// Returns true if payment can be confirmed in this status.
    pub fn can_confirm_payment(&self) -> bool {
        matches!(self, OrderStatus::PendingConfirmation)
    }

    /// Returns true if a shipment can be prepared in this status.
    pub fn can_prepare_shipment(&self) -> bool {
        matches!(self, OrderStatus::Processing)
    }

    /// Returns true if tracking details can be edited in place.
    pub fn can_edit_shipment(&self) -> bool {
        matches!(self, OrderStatus::Shipped)
    }

    /// Returns true if no further status transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Shipped)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingConfirmation => "PendingConfirmation",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_pending_confirmation() {
        assert_eq!(OrderStatus::default(), OrderStatus::PendingConfirmation);
    }

    #[test]
    fn only_pending_can_confirm_payment() {
        assert!(OrderStatus::PendingConfirmation.can_confirm_payment());
        assert!(!OrderStatus::Processing.can_confirm_payment());
        assert!(!OrderStatus::Shipped.can_confirm_payment());
    }

    #[test]
    fn only_processing_can_prepare_shipment() {
        assert!(!OrderStatus::PendingConfirmation.can_prepare_shipment());
        assert!(OrderStatus::Processing.can_prepare_shipment());
        assert!(!OrderStatus::Shipped.can_prepare_shipment());
    }

    #[test]
    fn only_shipped_can_edit_shipment() {
        assert!(!OrderStatus::PendingConfirmation.can_edit_shipment());
        assert!(!OrderStatus::Processing.can_edit_shipment());
        assert!(OrderStatus::Shipped.can_edit_shipment());
    }

    #[test]
    fn shipped_is_terminal() {
        assert!(!OrderStatus::PendingConfirmation.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn no_backward_or_skipping_pair_is_enabled() {
        // Every status enables at most the single forward action out of
        // itself; together with the lifecycle service this pins the
        // only reachable ordered pairs to
        // PendingConfirmation→Processing and Processing→Shipped.
        for status in [
            OrderStatus::PendingConfirmation,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ] {
            let enabled = [status.can_confirm_payment(), status.can_prepare_shipment()]
                .into_iter()
                .filter(|allowed| *allowed)
                .count();
            assert!(enabled <= 1);
        }
        assert!(!OrderStatus::Shipped.can_confirm_payment());
        assert!(!OrderStatus::Shipped.can_prepare_shipment());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(
            OrderStatus::PendingConfirmation.to_string(),
            "PendingConfirmation"
        );
        assert_eq!(OrderStatus::Processing.to_string(), "Processing");
        assert_eq!(OrderStatus::Shipped.to_string(), "Shipped");
    }

    #[test]
    fn serialization_roundtrip() {
        let status = OrderStatus::Processing;
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
