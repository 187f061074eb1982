//! # Invoice Tracker
//!
//! A small REST backend for keeping track of invoices: what was bought, for
//! how much, when it was invoiced, when it expires, and whether it has been
//! dealt with.
//!
//! ## Features
//!
//! - **Four operations**: create, list, delete, toggle done
//! - **Expiry-aware listing**: invoices expiring within a day come first
//! - **Pluggable storage**: in-memory, or MongoDB behind `mongodb_backend`
//! - **Typed errors**: every failure maps to a status code and JSON body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_tracker::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryInvoiceStore::new())
//!         .serve("127.0.0.1:5000".parse()?)
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CreateInvoiceRequest, Invoice, InvoiceError, InvoiceId, InvoiceResult, InvoiceService,
        InvoiceStore, InvoiceView, NewInvoice,
        error::{EntityError, ErrorResponse, StorageError, ValidationError},
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoInvoiceStore;

    // === Config ===
    pub use crate::config::{ConfigError, ServerConfig, StoreConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
