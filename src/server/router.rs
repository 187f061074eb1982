//! Route table and middleware stack

use crate::core::error::InvoiceError;
use crate::server::handlers::{
    AppState, create_invoice, delete_invoice, list_invoices, toggle_invoice_done,
};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router
///
/// Routes:
/// - GET    /invoices            - list, formatted, expiring soon first
/// - POST   /invoices            - create
/// - DELETE /invoices/{id}       - delete if present
/// - PUT    /invoices/{id}/done  - toggle the done flag
/// - GET    /health, /healthz    - liveness
///
/// `custom_routes` are merged in before the middleware, so they get the
/// same CORS, tracing and panic handling.
pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
    let mut app = health_routes().merge(invoice_routes(state));

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn invoice_routes(state: AppState) -> Router {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/{id}", delete(delete_invoice))
        .route("/invoices/{id}/done", put(toggle_invoice_done))
        .with_state(state)
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-tracker"
    }))
}

/// Catch-all for anything that escapes a handler
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Request handler panicked");
    InvoiceError::Internal(detail).into_response()
}
