//! In-memory implementation of InvoiceStore for testing and development

use crate::core::InvoiceStore;
use crate::core::invoice::{Invoice, InvoiceId, NewInvoice};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice store
///
/// Keeps insertion order so listings are deterministic. Ids are UUID v4
/// strings. Uses RwLock for thread-safe access; clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<IndexMap<InvoiceId, Invoice>>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    fn backend(&self) -> &'static str {
        "in-memory"
    }

    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = InvoiceId::new(Uuid::new_v4().to_string());
        let invoice = Invoice::from_new(id.clone(), invoice);
        invoices.insert(id, invoice.clone());

        Ok(invoice)
    }

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.values().cloned().collect())
    }

    async fn save(&self, invoice: &Invoice) -> Result<Invoice> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let stored = invoices
            .get_mut(&invoice.id)
            .ok_or_else(|| anyhow!("Invoice not found: {}", invoice.id))?;
        stored.done = invoice.done;

        Ok(stored.clone())
    }

    async fn delete(&self, id: &InvoiceId) -> Result<()> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        // shift_remove keeps the remaining records in insertion order
        invoices.shift_remove(id);

        Ok(())
    }
}
