//! Invoice HTTP handlers

use crate::core::error::InvoiceResult;
use crate::core::invoice::{CreateInvoiceRequest, Invoice, InvoiceId, InvoiceView};
use crate::core::service::InvoiceService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{Value, json};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: InvoiceService,
}

/// POST /invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> InvoiceResult<Json<Invoice>> {
    let Json(request) = payload?;
    let invoice = state.service.create(request).await?;
    Ok(Json(invoice))
}

/// GET /invoices
pub async fn list_invoices(State(state): State<AppState>) -> InvoiceResult<Json<Vec<InvoiceView>>> {
    let invoices = state.service.list().await?;
    Ok(Json(invoices))
}

/// DELETE /invoices/{id}
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> InvoiceResult<Json<Value>> {
    state.service.delete(&InvoiceId::from(id)).await?;
    Ok(Json(json!({ "message": "Invoice deleted" })))
}

/// PUT /invoices/{id}/done
pub async fn toggle_invoice_done(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> InvoiceResult<Json<Invoice>> {
    let invoice = state.service.toggle_done(&InvoiceId::from(id)).await?;
    Ok(Json(invoice))
}
