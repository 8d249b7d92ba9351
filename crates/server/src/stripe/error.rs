//! Stripe-related errors.

use std::fmt;

use thiserror::Error;

use super::types::ApiErrorBody;

/// Classification of a Stripe API failure.
///
/// Derived from the error envelope's `type` plus the HTTP status, since
/// authentication and rate-limit failures are signalled by status code
/// (401, 429) in current API versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The card was declined or could not be used.
    Card,
    /// The request had invalid parameters or referenced a missing object.
    InvalidRequest,
    /// The API key was missing, invalid or revoked.
    Authentication,
    /// Too many requests hit the API too quickly.
    RateLimit,
    /// An idempotency key was reused with different parameters.
    Idempotency,
    /// Stripe could not be reached.
    Connection,
    /// Anything else, including Stripe-side failures.
    Api,
}

impl ErrorKind {
    /// Classify a non-2xx response.
    #[must_use]
    pub fn classify(status: u16, error_type: Option<&str>) -> Self {
        match (status, error_type) {
            (_, Some("card_error")) => Self::Card,
            (401, _) | (_, Some("authentication_error")) => Self::Authentication,
            (429, _) | (_, Some("rate_limit_error")) => Self::RateLimit,
            (_, Some("idempotency_error")) => Self::Idempotency,
            (_, Some("invalid_request_error")) => Self::InvalidRequest,
            (_, Some("api_connection_error")) => Self::Connection,
            _ => Self::Api,
        }
    }

    /// Stripe's name for this kind of error.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card_error",
            Self::InvalidRequest => "invalid_request_error",
            Self::Authentication => "authentication_error",
            Self::RateLimit => "rate_limit_error",
            Self::Idempotency => "idempotency_error",
            Self::Connection => "api_connection_error",
            Self::Api => "api_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when calling the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Stripe request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe answered with a non-2xx status.
    #[error("Stripe API error: {status} {kind} - {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        kind: ErrorKind,
        message: Option<String>,
        code: Option<String>,
        decline_code: Option<String>,
        param: Option<String>,
    },

    /// A 2xx response body could not be decoded.
    #[error("Stripe response error: {0}")]
    Parse(String),

    /// Client construction failed.
    #[error("Stripe configuration error: {0}")]
    Config(String),
}

impl StripeError {
    /// Build an API error from a status and a (possibly empty) error body.
    #[must_use]
    pub fn from_api(status: u16, body: ApiErrorBody) -> Self {
        Self::Api {
            status,
            kind: ErrorKind::classify(status, body.error_type.as_deref()),
            message: body.message,
            code: body.code,
            decline_code: body.decline_code,
            param: body.param,
        }
    }

    /// The classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) => ErrorKind::Connection,
            Self::Api { kind, .. } => *kind,
            Self::Parse(_) | Self::Config(_) => ErrorKind::Api,
        }
    }

    /// The message Stripe supplied, if any.
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
