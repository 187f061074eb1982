//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryInvoiceStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoInvoiceStore;

use crate::config::StoreConfig;
use crate::core::InvoiceStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the store described by the configuration
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn InvoiceStore>> {
    match config {
        StoreConfig::InMemory => {
            tracing::warn!("MONGO_URI not set, using in-memory invoice store (data is not persisted)");
            Ok(Arc::new(InMemoryInvoiceStore::new()))
        }
        #[cfg(feature = "mongodb_backend")]
        StoreConfig::Mongo {
            uri,
            database,
            collection,
        } => {
            let store = MongoInvoiceStore::connect(uri, database.as_deref(), collection).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StoreConfig::Mongo { .. } => Err(crate::config::ConfigError::MongoBackendDisabled.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let store = connect(&StoreConfig::InMemory).await.unwrap();
        assert_eq!(store.backend(), "in-memory");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_mongo_with_bad_uri_fails() {
        let config = StoreConfig::Mongo {
            uri: "not-a-mongo-uri".to_string(),
            database: None,
            collection: "invoices".to_string(),
        };

        let err = match connect(&config).await {
            Ok(_) => panic!("expected connect to fail"),
            Err(err) => err,
        };

        #[cfg(feature = "mongodb_backend")]
        assert!(err.to_string().contains("Failed to connect to MongoDB"));
        #[cfg(not(feature = "mongodb_backend"))]
        assert!(err.to_string().contains("mongodb_backend"));
    }
}
