//! Invoice operations over an injected record store

use crate::core::error::{EntityError, InvoiceError, InvoiceResult, StorageError};
use crate::core::invoice::{
    CreateInvoiceRequest, Invoice, InvoiceId, InvoiceView, order_expiring_first,
};
use crate::core::store::InvoiceStore;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;

/// Service implementing create, list, delete and toggle-done
///
/// Holds no state besides the store handle, so it is cheap to clone into
/// every request.
#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn InvoiceStore>,
}

impl InvoiceService {
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    /// Validate and persist a new invoice; nothing is written if a date is invalid.
    pub async fn create(&self, request: CreateInvoiceRequest) -> InvoiceResult<Invoice> {
        let new = request.validate()?;

        let invoice = self
            .store
            .insert(new)
            .await
            .map_err(|e| self.storage_error("insert", e))?;

        tracing::info!(invoice_id = %invoice.id, "Invoice created");
        Ok(invoice)
    }

    /// Formatted invoices, expiring-soon first, against the current instant
    /// and the server's local timezone.
    pub async fn list(&self) -> InvoiceResult<Vec<InvoiceView>> {
        self.list_at(Utc::now(), &Local).await
    }

    pub async fn list_at<Tz>(&self, now: DateTime<Utc>, tz: &Tz) -> InvoiceResult<Vec<InvoiceView>>
    where
        Tz: TimeZone + Sync,
        Tz::Offset: fmt::Display,
    {
        let invoices = self
            .store
            .list()
            .await
            .map_err(|e| self.storage_error("list", e))?;

        let mut views: Vec<InvoiceView> = invoices
            .iter()
            .map(|invoice| InvoiceView::from_invoice(invoice, tz))
            .collect();
        order_expiring_first(&mut views, now);

        tracing::debug!(count = views.len(), "Listed invoices");
        Ok(views)
    }

    /// Delete-if-exists
    pub async fn delete(&self, id: &InvoiceId) -> InvoiceResult<()> {
        self.store
            .delete(id)
            .await
            .map_err(|e| self.storage_error("delete", e))?;

        tracing::info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    /// Flip `done` on an existing invoice.
    ///
    /// This is a plain read-modify-write: two concurrent toggles on the same
    /// id can both read the same value.
    pub async fn toggle_done(&self, id: &InvoiceId) -> InvoiceResult<Invoice> {
        let mut invoice = self
            .store
            .get(id)
            .await
            .map_err(|e| self.storage_error("get", e))?
            .ok_or_else(|| EntityError::NotFound {
                entity_type: "Invoice".to_string(),
                id: id.to_string(),
            })?;

        invoice.toggle_done();

        let saved = self
            .store
            .save(&invoice)
            .await
            .map_err(|e| self.storage_error("save", e))?;

        tracing::info!(invoice_id = %id, done = saved.done, "Invoice done status toggled");
        Ok(saved)
    }

    fn storage_error(&self, operation: &str, err: anyhow::Error) -> InvoiceError {
        let backend = self.store.backend();
        tracing::error!(backend, operation, error = %err, "Invoice store operation failed");

        StorageError::QueryError {
            backend: backend.to_string(),
            message: err.to_string(),
        }
        .into()
    }
}
