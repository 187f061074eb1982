//! Core module containing the invoice model, its operations, and the store seam

pub mod cast;
pub mod date;
pub mod error;
pub mod invoice;
pub mod service;
pub mod store;

pub use error::{InvoiceError, InvoiceResult};
pub use invoice::{CreateInvoiceRequest, Invoice, InvoiceId, InvoiceView, NewInvoice};
pub use service::InvoiceService;
pub use store::InvoiceStore;
