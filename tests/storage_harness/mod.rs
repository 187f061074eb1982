//! Shared test harness for invoice store testing
//!
//! Provides helpers for building invoices and the `invoice_store_tests!`
//! macro that validates any `InvoiceStore` implementation.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod store_contract_tests;

use chrono::{DateTime, TimeZone, Utc};
use invoice_tracker::core::NewInvoice;

/// Fixed invoice date used across the harness
pub fn invoice_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// A validated invoice with the given number and expiry
pub fn new_invoice(number: &str, expiry: DateTime<Utc>) -> NewInvoice {
    NewInvoice {
        invoice_number: Some(number.to_string()),
        invoice_date: invoice_date(),
        item_name: Some(format!("Item for {}", number)),
        price: Some(10.0),
        expiry_date: expiry,
    }
}

/// A validated invoice with only the required dates
pub fn bare_invoice() -> NewInvoice {
    NewInvoice {
        invoice_number: None,
        invoice_date: invoice_date(),
        item_name: None,
        price: None,
        expiry_date: Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
    }
}
