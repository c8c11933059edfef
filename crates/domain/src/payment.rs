//! Bank-transfer payment configuration singleton.

use doc_store::{DocumentStore, DocumentStoreExt};
use serde::{Deserialize, Serialize};

use crate::collections;
use crate::error::DomainError;

/// Transfer details shown to customers at checkout.
///
/// A single public document; written only by admin settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Transfer alias.
    pub alias: String,

    /// Bank account identifier.
    pub account_number: String,

    /// Account holder name.
    pub holder_name: String,

    /// Account holder tax ID.
    pub tax_id: String,
}

/// Reads and writes the payment-info singleton.
pub struct PaymentSettings<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> PaymentSettings<S> {
    /// Creates a new settings handle over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the current payment configuration, if any has been saved.
    pub async fn get(&self) -> Result<Option<PaymentInfo>, DomainError> {
        match self.store.get(&collections::payment_info()).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Replaces the payment configuration.
    #[tracing::instrument(skip(self, info))]
    pub async fn save(&self, info: &PaymentInfo) -> Result<(), DomainError> {
        self.store
            .put(&collections::payment_info(), serde_json::to_value(info)?)
            .await?;
        tracing::info!("payment settings updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_store::MemoryStore;

    fn info() -> PaymentInfo {
        PaymentInfo {
            alias: "thunder.store".to_string(),
            account_number: "0000003100010000000001".to_string(),
            holder_name: "Thunder Retail SA".to_string(),
            tax_id: "30-12345678-9".to_string(),
        }
    }

    #[tokio::test]
    async fn get_before_save_returns_none() {
        let settings = PaymentSettings::new(MemoryStore::new());
        assert!(settings.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_get_roundtrip() {
        let settings = PaymentSettings::new(MemoryStore::new());
        settings.save(&info()).await.unwrap();
        assert_eq!(settings.get().await.unwrap().unwrap(), info());
    }

    #[tokio::test]
    async fn save_replaces_previous_value() {
        let settings = PaymentSettings::new(MemoryStore::new());
        settings.save(&info()).await.unwrap();

        let mut updated = info();
        updated.alias = "thunder.payments".to_string();
        settings.save(&updated).await.unwrap();

        assert_eq!(settings.get().await.unwrap().unwrap().alias, "thunder.payments");
    }
}
