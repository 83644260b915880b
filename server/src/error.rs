//! API Error Types
//!
//! The single taxonomy every handler funnels into. Errors are converted
//! to a uniform JSON envelope at the HTTP boundary; there are no partial
//! failures and no retries in the core.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::store::StoreError;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed caller-supplied fields.
    #[error("{0}")]
    Validation(String),

    /// Unknown message type or group action.
    #[error("{0}")]
    UnsupportedType(String),

    /// Webhook token missing or mismatched.
    #[error("Invalid webhook token")]
    Auth,

    /// Webhook body does not match the envelope schema.
    #[error("Invalid webhook data")]
    MalformedPayload,

    /// Gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Persistence collaborator failed.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// Error response body for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::UnsupportedType(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_TYPE"),
            Self::Auth => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            Self::MalformedPayload => (StatusCode::BAD_REQUEST, "MALFORMED_PAYLOAD"),
            Self::Gateway(e) => {
                tracing::error!("Gateway error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "GATEWAY_ERROR")
            }
            Self::Persistence(e) => {
                tracing::error!("Store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_ERROR")
            }
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
