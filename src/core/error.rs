//! Typed error handling for the invoice API
//!
//! Every failure a request can produce is one of:
//!
//! - [`ValidationError`]: the client sent something unusable (400)
//! - [`EntityError`]: the addressed invoice does not exist (404)
//! - [`StorageError`]: the record store failed (500, message passed through)
//! - [`InvoiceError::Internal`]: anything else (generic 500)
//!
//! `InvoiceError` implements [`IntoResponse`], so handlers return
//! `InvoiceResult<Json<T>>` and the status/body mapping lives here.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Message used for failures whose detail must not reach the client
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// The main error type for invoice operations
#[derive(Debug)]
pub enum InvoiceError {
    /// Entity lookups that found nothing
    Entity(EntityError),

    /// Invalid client input
    Validation(ValidationError),

    /// Record store failures
    Storage(StorageError),

    /// Unexpected failures
    Internal(String),
}

impl fmt::Display for InvoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceError::Entity(e) => write!(f, "{}", e),
            InvoiceError::Validation(e) => write!(f, "{}", e),
            InvoiceError::Storage(e) => write!(f, "{}", e),
            InvoiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for InvoiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvoiceError::Entity(e) => Some(e),
            InvoiceError::Validation(e) => Some(e),
            InvoiceError::Storage(e) => Some(e),
            InvoiceError::Internal(_) => None,
        }
    }
}

/// Error body returned to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InvoiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::Entity(e) => e.status_code(),
            InvoiceError::Validation(_) => StatusCode::BAD_REQUEST,
            InvoiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            InvoiceError::Entity(e) => e.error_code(),
            InvoiceError::Validation(e) => e.error_code(),
            InvoiceError::Storage(_) => "STORAGE_ERROR",
            InvoiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            InvoiceError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InvoiceError::Entity(EntityError::NotFound { id, .. }) => {
                Some(serde_json::json!({ "id": id }))
            }
            InvoiceError::Validation(ValidationError::InvalidDate { fields }) => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

#[derive(Debug)]
pub enum EntityError {
    NotFound { entity_type: String, id: String },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, .. } => write!(f, "{} not found", entity_type),
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl From<EntityError> for InvoiceError {
    fn from(err: EntityError) -> Self {
        InvoiceError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

#[derive(Debug)]
pub enum ValidationError {
    /// One or more date fields did not parse
    InvalidDate { fields: Vec<String> },

    /// The request body was not the expected JSON
    InvalidJson { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidDate { .. } => write!(f, "Invalid date format."),
            ValidationError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidDate { .. } => "INVALID_DATE",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
        }
    }
}

impl From<ValidationError> for InvoiceError {
    fn from(err: ValidationError) -> Self {
        InvoiceError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

#[derive(Debug)]
pub enum StorageError {
    ConnectionError { backend: String, message: String },
    QueryError { backend: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for InvoiceError {
    fn from(err: StorageError) -> Self {
        InvoiceError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<JsonRejection> for InvoiceError {
    fn from(rejection: JsonRejection) -> Self {
        InvoiceError::Validation(ValidationError::InvalidJson {
            message: rejection.body_text(),
        })
    }
}

impl From<serde_json::Error> for InvoiceError {
    fn from(err: serde_json::Error) -> Self {
        InvoiceError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;
