//! Invoice record, its creation payload, and its list representation

use crate::core::cast;
use crate::core::date::{self, format_stored};
use crate::core::error::ValidationError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque record identifier assigned by the store
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for InvoiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for InvoiceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Body of `POST /invoices`
///
/// Dates are kept as raw JSON here (a string, or epoch milliseconds); they
/// only become timestamps through [`CreateInvoiceRequest::validate`]. The
/// other fields are cast leniently, so `"invoiceNumber": 123` and
/// `"price": "10"` are accepted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[serde(default, deserialize_with = "cast::text::deserialize")]
    pub invoice_number: Option<String>,

    #[serde(default)]
    pub invoice_date: Option<Value>,

    #[serde(default, deserialize_with = "cast::text::deserialize")]
    pub item_name: Option<String>,

    #[serde(default, deserialize_with = "cast::number::deserialize")]
    pub price: Option<f64>,

    #[serde(default)]
    pub expiry_date: Option<Value>,
}

impl CreateInvoiceRequest {
    /// Parse both dates, reporting every field that failed.
    pub fn validate(self) -> Result<NewInvoice, ValidationError> {
        let invoice_date = self.invoice_date.as_ref().and_then(parse_input_date);
        let expiry_date = self.expiry_date.as_ref().and_then(parse_input_date);

        match (invoice_date, expiry_date) {
            (Some(invoice_date), Some(expiry_date)) => Ok(NewInvoice {
                invoice_number: self.invoice_number,
                invoice_date,
                item_name: self.item_name,
                price: self.price,
                expiry_date,
            }),
            (invoice_date, expiry_date) => {
                let mut fields = Vec::new();
                if invoice_date.is_none() {
                    fields.push("invoiceDate".to_string());
                }
                if expiry_date.is_none() {
                    fields.push("expiryDate".to_string());
                }
                Err(ValidationError::InvalidDate { fields })
            }
        }
    }
}

/// Client dates are strings or epoch milliseconds; anything else is invalid.
fn parse_input_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(_) | Value::Number(_) => date::timestamp_from_value(value),
        _ => None,
    }
}

/// A validated invoice that has not been persisted yet
#[derive(Clone, Debug, PartialEq)]
pub struct NewInvoice {
    pub invoice_number: Option<String>,
    pub invoice_date: DateTime<Utc>,
    pub item_name: Option<String>,
    pub price: Option<f64>,
    pub expiry_date: DateTime<Utc>,
}

/// A stored invoice
///
/// Dates are optional only because a document store may hand back a record
/// written by another client with an unreadable date; records created here
/// always carry both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    #[serde(default, with = "date::timestamp")]
    pub invoice_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    #[serde(default, with = "cast::number", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, with = "date::timestamp")]
    pub expiry_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub done: bool,
}

impl Invoice {
    /// Materialize a new record under a store-assigned id
    pub fn from_new(id: InvoiceId, new: NewInvoice) -> Self {
        Self {
            id,
            invoice_number: new.invoice_number,
            invoice_date: Some(new.invoice_date),
            item_name: new.item_name,
            price: new.price,
            expiry_date: Some(new.expiry_date),
            done: false,
        }
    }

    pub fn toggle_done(&mut self) {
        self.done = !self.done;
    }
}

/// List representation of an invoice with calendar-day dates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub id: InvoiceId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    pub invoice_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    #[serde(default, with = "cast::number", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    pub expiry_date: String,

    pub done: bool,
}

impl InvoiceView {
    pub fn from_invoice<Tz: TimeZone>(invoice: &Invoice, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            id: invoice.id.clone(),
            invoice_number: invoice.invoice_number.clone(),
            invoice_date: format_stored(invoice.invoice_date.as_ref(), tz),
            item_name: invoice.item_name.clone(),
            price: invoice.price,
            expiry_date: format_stored(invoice.expiry_date.as_ref(), tz),
            done: invoice.done,
        }
    }

    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        date::is_expiring_soon(&self.expiry_date, now)
    }
}

/// Move expiring-soon views ahead of the rest.
///
/// `sort_by_key` is stable, so retrieval order survives inside each group.
pub fn order_expiring_first(views: &mut [InvoiceView], now: DateTime<Utc>) {
    views.sort_by_key(|view| !view.is_expiring_soon(now));
}
