//! Record store trait for invoices

use crate::core::invoice::{Invoice, InvoiceId, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;

/// Persistence seam for invoice records
///
/// Implementations only move records in and out; validation, formatting and
/// ordering live in [`InvoiceService`](crate::core::service::InvoiceService).
/// An id the backend cannot interpret behaves like an id with no record.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Short backend name used in logs and error messages
    fn backend(&self) -> &'static str;

    /// Persist a new invoice, assigning its id
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Fetch an invoice by id
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>>;

    /// All invoices in retrieval order
    async fn list(&self) -> Result<Vec<Invoice>>;

    /// Write back the mutable state (`done`) of an existing invoice
    ///
    /// Returns `Err` if no record with that id exists.
    async fn save(&self, invoice: &Invoice) -> Result<Invoice>;

    /// Delete an invoice; succeeds whether or not it existed
    async fn delete(&self, id: &InvoiceId) -> Result<()>;
}
