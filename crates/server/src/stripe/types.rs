//! Stripe REST API wire types.
//!
//! Request parameters are form-encoded with Stripe's bracket notation for
//! nested fields (`card[number]`). Responses only declare the fields this
//! service maps; everything else in the payload is ignored.

use chrono::{DateTime, Utc};
use paybridge_core::{
    CardTokenId, Currency, CustomerId, PaymentId, PaymentIntentId, PaymentIntentStatus,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Request parameters
// =============================================================================

/// Parameters for `POST /v1/tokens`.
///
/// Deliberately not `Debug`: it holds the raw card number and CVC.
#[derive(Serialize)]
pub struct CardTokenParams<'a> {
    #[serde(rename = "card[name]")]
    pub name: &'a str,
    #[serde(rename = "card[number]")]
    pub number: &'a str,
    #[serde(rename = "card[exp_year]")]
    pub exp_year: &'a str,
    #[serde(rename = "card[exp_month]")]
    pub exp_month: &'a str,
    #[serde(rename = "card[cvc]")]
    pub cvc: &'a str,
}

/// Parameters for `POST /v1/customers`.
#[derive(Debug, Serialize)]
pub struct CustomerCreateParams<'a> {
    pub name: &'a str,
    pub email: &'a str,
    /// Token id to attach as the customer's default payment source.
    pub source: &'a str,
}

/// Parameters for `POST /v1/charges`.
#[derive(Debug, Serialize)]
pub struct ChargeCreateParams<'a> {
    pub customer: &'a str,
    pub receipt_email: &'a str,
    pub description: &'a str,
    pub currency: &'a str,
    pub amount: i64,
}

// =============================================================================
// Response objects
// =============================================================================

/// A single-use card token.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub id: CardTokenId,
    pub card: Option<TokenCard>,
}

/// Card summary attached to a token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenCard {
    pub brand: Option<String>,
    pub last4: Option<String>,
}

/// A customer object. Deleted customers only carry `id` and `deleted`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    pub id: CustomerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// A charge object.
#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    pub id: PaymentId,
    pub customer: Option<CustomerId>,
    pub receipt_email: Option<String>,
    pub description: Option<String>,
    pub currency: Currency,
    pub amount: i64,
    pub status: Option<String>,
}

/// A payment intent object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    pub id: PaymentIntentId,
    pub amount: i64,
    #[serde(default)]
    pub amount_received: i64,
    pub currency: Currency,
    pub status: PaymentIntentStatus,
    pub customer: Option<CustomerId>,
    pub description: Option<String>,
    pub receipt_email: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,
}

/// Error envelope returned with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

/// The `error` object inside [`ErrorEnvelope`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub code: Option<String>,
    pub decline_code: Option<String>,
    pub param: Option<String>,
}
