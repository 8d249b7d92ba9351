//! Request and response records exposed over HTTP.
//!
//! All records are serialized with camelCase field names. Inbound records
//! validate structure on deserialization (ids non-empty, email shape,
//! currency code, positive amount); everything else is the provider's call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    Amount, CardDetails, Currency, CustomerId, Email, PaymentId, PaymentIntentId,
};

/// Request to register a customer together with a card as its payment source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomer {
    pub email: Email,
    pub name: String,
    pub credit_card: CardDetails,
}

/// Request to charge an existing customer's default payment source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPayment {
    /// Customer to charge. Must already exist at the provider.
    pub customer_id: CustomerId,
    pub receipt_email: Email,
    pub description: String,
    pub currency: Currency,
    /// Amount in the currency's smallest unit.
    pub amount: Amount,
}

/// A customer as known by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub customer_id: CustomerId,
}

/// A charge created against a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub customer_id: Option<CustomerId>,
    pub receipt_email: Option<String>,
    pub description: Option<String>,
    pub currency: Currency,
    pub amount: i64,
    pub payment_id: PaymentId,
}

/// Lifecycle status of a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    /// A status this service does not know about yet.
    #[serde(other)]
    Unknown,
}

/// A payment intent as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub payment_intent_id: PaymentIntentId,
    pub amount: i64,
    pub amount_received: i64,
    pub currency: Currency,
    pub status: PaymentIntentStatus,
    pub customer_id: Option<CustomerId>,
    pub description: Option<String>,
    pub receipt_email: Option<String>,
    pub created: DateTime<Utc>,
}
