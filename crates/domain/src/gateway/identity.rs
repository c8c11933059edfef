//! Identity provider boundary.

use async_trait::async_trait;
use common::CustomerId;

use crate::error::DomainError;

/// Supplies the stable customer identifier that scopes every cart and
/// order operation. Session bootstrap (anonymous or token-based) lives
/// behind this boundary; the engine treats the result as opaque.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the identifier for the current session.
    async fn current_customer(&self) -> Result<CustomerId, DomainError>;
}

/// Identity provider with a fixed identifier, standing in for an
/// anonymous session.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    customer: CustomerId,
}

impl StaticIdentity {
    /// Creates a provider that always returns the given identifier.
    pub fn new(customer: CustomerId) -> Self {
        Self { customer }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_customer(&self) -> Result<CustomerId, DomainError> {
        Ok(self.customer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_identity_is_stable() {
        let provider = StaticIdentity::new(CustomerId::new("anon-1"));
        let a = provider.current_customer().await.unwrap();
        let b = provider.current_customer().await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "anon-1");
    }
}
