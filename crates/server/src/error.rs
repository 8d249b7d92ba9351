//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side faults to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Every payment provider failure is answered with `400 Bad Request` and a
//! plain-text body holding the translated message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::PaymentError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Payment provider operation failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture faults on our side (or the provider's) to Sentry
        if matches!(&self, Self::Payment(err) if err.is_server_fault()) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Payment(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Payment errors already carry a caller-facing message
        let message = match self {
            Self::Payment(err) => err.to_string(),
            other => other.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
