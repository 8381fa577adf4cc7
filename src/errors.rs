use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error structure returned to HTTP clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Additional error details (e.g., both totals on a mismatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

/// Service-level error type used across the application
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    /// No cart exists for the given user.
    #[error("No cart found for user {0}")]
    CartNotFound(Uuid),

    /// The cart exists but has no lines; an order with zero items is never created.
    #[error("Cart {0} is empty")]
    EmptyCart(Uuid),

    /// The client-claimed grand total disagrees with the server-computed one.
    /// Never silently corrected.
    #[error("Submitted total {received} does not match computed total {expected}")]
    TotalMismatch { expected: Decimal, received: Decimal },

    /// A cart line references a missing variant, product, or supplier.
    /// Data corruption; the whole checkout aborts rather than skipping the line.
    #[error("Data integrity fault: {0}")]
    IntegrityFault(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// Returns the HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CartNotFound(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyCart(_) => StatusCode::CONFLICT,
            Self::TotalMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_) | Self::IntegrityFault(_) | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            Self::IntegrityFault(_) => "Data integrity fault".to_string(),
            other => other.to_string(),
        }
    }

    /// Structured details attached to the HTTP response body, where the
    /// taxonomy defines any (both totals for a mismatch).
    fn response_details(&self) -> Option<serde_json::Value> {
        match self {
            Self::TotalMismatch { expected, received } => Some(serde_json::json!({
                "expected_total": expected,
                "received_total": received,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: self.response_details(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}
