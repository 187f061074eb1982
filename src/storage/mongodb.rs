//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! Gated behind the `mongodb_backend` feature (enabled by default).
//!
//! # Storage model
//!
//! Invoices live in a single collection. The store
//! assigns `ObjectId`s, exposed as their 24-character hex form. Dates are
//! stored as native BSON dates so documents stay compatible with other
//! clients of the same collection. Unknown document fields (e.g. a `__v`
//! version key) are ignored on read.
//!
//! # Serialization strategy
//!
//! New invoices are written as hand-built documents. Documents are read back
//! through relaxed extended JSON into [`Invoice`], renaming `_id` → `id`.

use crate::core::InvoiceStore;
use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceId, NewInvoice};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Client, Collection, Database};

/// Database used when neither configuration nor the URI names one
pub const DEFAULT_DATABASE: &str = "invoices";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn bson_date(timestamp: &DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_millis(timestamp.timestamp_millis()))
}

/// Build the document for a new invoice. Absent optional fields are left out.
fn new_invoice_to_document(invoice: &NewInvoice) -> Document {
    let mut doc = Document::new();

    if let Some(number) = &invoice.invoice_number {
        doc.insert("invoiceNumber", number.as_str());
    }
    doc.insert("invoiceDate", bson_date(&invoice.invoice_date));
    if let Some(item) = &invoice.item_name {
        doc.insert("itemName", item.as_str());
    }
    if let Some(price) = invoice.price {
        doc.insert("price", price);
    }
    doc.insert("expiryDate", bson_date(&invoice.expiry_date));
    doc.insert("done", false);

    doc
}

/// Convert a stored document into an [`Invoice`], renaming `_id` → `id`.
fn document_to_invoice(mut doc: Document) -> Result<Invoice> {
    let id = match doc.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s,
        Some(other) => other.to_string(),
        None => return Err(anyhow!("Invoice document has no _id")),
    };
    doc.insert("id", id);

    let json = Bson::Document(doc).into_relaxed_extjson();
    serde_json::from_value(json)
        .map_err(|e| anyhow!("Failed to deserialize invoice from document: {}", e))
}

/// Filter matching an id. Hex strings are tried as `ObjectId`s; anything
/// else is matched verbatim and simply finds nothing in a store we wrote.
fn id_filter(id: &InvoiceId) -> Document {
    match ObjectId::parse_str(id.as_str()) {
        Ok(oid) => doc! { "_id": oid },
        Err(_) => doc! { "_id": id.as_str() },
    }
}

// ---------------------------------------------------------------------------
// MongoInvoiceStore
// ---------------------------------------------------------------------------

/// Invoice store backed by a MongoDB collection.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use invoice_tracker::storage::MongoInvoiceStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoInvoiceStore::new(client.database("cakes"), "invoices");
/// ```
#[derive(Clone, Debug)]
pub struct MongoInvoiceStore {
    collection: Collection<Document>,
}

impl MongoInvoiceStore {
    pub fn new(database: Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }

    /// Connect with a connection string.
    ///
    /// The database is `database` if given, else the one named in the URI,
    /// else [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(|e| {
            anyhow::Error::new(StorageError::ConnectionError {
                backend: "MongoDB".to_string(),
                message: e.to_string(),
            })
        })?;

        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        tracing::info!(
            database = %database.name(),
            collection,
            "Connected to MongoDB"
        );

        Ok(Self::new(database, collection))
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

#[async_trait]
impl InvoiceStore for MongoInvoiceStore {
    fn backend(&self) -> &'static str {
        "MongoDB"
    }

    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice> {
        let result = self
            .collection
            .insert_one(new_invoice_to_document(&invoice))
            .await
            .map_err(|e| anyhow!("Failed to create invoice: {}", e))?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => return Err(anyhow!("Unexpected inserted id: {}", other)),
        };

        Ok(Invoice::from_new(InvoiceId::new(id), invoice))
    }

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>> {
        let doc = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(|e| anyhow!("Failed to get invoice: {}", e))?;

        doc.map(document_to_invoice).transpose()
    }

    /// Natural (insertion) order; no sort is applied.
    async fn list(&self) -> Result<Vec<Invoice>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to list invoices: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect invoices: {}", e))?;

        docs.into_iter().map(document_to_invoice).collect()
    }

    async fn save(&self, invoice: &Invoice) -> Result<Invoice> {
        let filter = id_filter(&invoice.id);

        let result = self
            .collection
            .update_one(filter.clone(), doc! { "$set": { "done": invoice.done } })
            .await
            .map_err(|e| anyhow!("Failed to update invoice: {}", e))?;

        if result.matched_count == 0 {
            return Err(anyhow!("Invoice not found: {}", invoice.id));
        }

        let updated = self
            .collection
            .find_one(filter)
            .await
            .map_err(|e| anyhow!("Failed to read back updated invoice: {}", e))?
            .ok_or_else(|| anyhow!("Invoice not found after update"))?;

        document_to_invoice(updated)
    }

    async fn delete(&self, id: &InvoiceId) -> Result<()> {
        self.collection
            .delete_one(id_filter(id))
            .await
            .map_err(|e| anyhow!("Failed to delete invoice: {}", e))?;

        Ok(())
    }
}
