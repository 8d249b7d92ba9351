//! Payment facade service.
//!
//! Maps local request records to Stripe parameters, calls the client, and
//! maps the result back to local response records. Stripe failures are
//! translated into [`PaymentError`], whose `Display` is the message shown
//! to API callers.

use paybridge_core::{
    AddCustomer, AddPayment, Customer, CustomerId, Payment, PaymentIntent, PaymentIntentId,
};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::stripe::types::{
    CardTokenParams, Charge, ChargeCreateParams, CustomerCreateParams, StripeCustomer,
    StripePaymentIntent,
};
use crate::stripe::{ErrorKind, StripeClient, StripeError};

const CARD_FALLBACK: &str = "The card could not be charged.";
const INVALID_REQUEST_FALLBACK: &str = "The request to the payment provider was invalid.";

/// Provider failure, reduced to what a caller can act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The card was declined or is invalid.
    #[error("{message}")]
    Card {
        message: String,
        decline_code: Option<String>,
    },

    /// The request was rejected by the provider.
    #[error("{message}")]
    InvalidRequest {
        message: String,
        param: Option<String>,
    },

    /// The provider could not be reached.
    #[error("Could not connect to the payment provider. Please try again.")]
    Connection,

    /// Our credentials were rejected.
    #[error("Authentication with the payment provider failed.")]
    Authentication,

    /// Too many requests.
    #[error("Too many requests to the payment provider. Please try again later.")]
    RateLimit,

    /// Idempotency key reused with different parameters.
    #[error("The idempotency key was already used with different parameters.")]
    Idempotency,

    /// Anything the table above does not cover.
    #[error("An error occurred while processing the payment.")]
    Other,
}

impl PaymentError {
    /// Whether the failure points at our side or the provider's, rather
    /// than at the caller's input.
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        matches!(self, Self::Connection | Self::Authentication | Self::Other)
    }
}

impl From<StripeError> for PaymentError {
    fn from(err: StripeError) -> Self {
        let message = err.provider_message().map(str::to_owned);

        match err {
            StripeError::Api {
                kind: ErrorKind::Card,
                decline_code,
                ..
            } => Self::Card {
                message: message.unwrap_or_else(|| CARD_FALLBACK.to_string()),
                decline_code,
            },
            StripeError::Api {
                kind: ErrorKind::InvalidRequest,
                param,
                ..
            } => Self::InvalidRequest {
                message: message.unwrap_or_else(|| INVALID_REQUEST_FALLBACK.to_string()),
                param,
            },
            other => match other.kind() {
                ErrorKind::Connection => Self::Connection,
                ErrorKind::Authentication => Self::Authentication,
                ErrorKind::RateLimit => Self::RateLimit,
                ErrorKind::Idempotency => Self::Idempotency,
                ErrorKind::Card | ErrorKind::InvalidRequest | ErrorKind::Api => Self::Other,
            },
        }
    }
}

/// The four operations exposed over HTTP.
#[derive(Debug, Clone)]
pub struct PaymentService {
    stripe: StripeClient,
}

impl PaymentService {
    /// Create a service backed by `stripe`.
    #[must_use]
    pub const fn new(stripe: StripeClient) -> Self {
        Self { stripe }
    }

    /// Register a customer with the given card as default payment source.
    ///
    /// Tokenizes the card first, then creates the customer with the token as
    /// its source. With an idempotency key `k`, the two calls use `k-token`
    /// and `k-customer` so a retried request replays both.
    ///
    /// # Errors
    ///
    /// Returns the translated provider error of whichever call failed.
    #[instrument(skip_all, fields(email = %request.email, last4 = %request.credit_card.last4()))]
    pub async fn add_customer(
        &self,
        request: &AddCustomer,
        idempotency_key: Option<&str>,
    ) -> Result<Customer, PaymentError> {
        let token_key = idempotency_key.map(|key| format!("{key}-token"));
        let token = self
            .stripe
            .create_card_token(&card_token_params(request), token_key.as_deref())
            .await
            .inspect_err(|e| warn!(error = %e, "Card tokenization failed"))?;

        let customer_key = idempotency_key.map(|key| format!("{key}-customer"));
        let created = self
            .stripe
            .create_customer(
                &CustomerCreateParams {
                    name: &request.name,
                    email: request.email.as_str(),
                    source: token.id.as_str(),
                },
                customer_key.as_deref(),
            )
            .await
            .inspect_err(|e| warn!(error = %e, "Customer creation failed"))?;

        info!(customer_id = %created.id, "Customer registered");
        Ok(customer_from(created))
    }

    /// Charge an existing customer's default payment source.
    ///
    /// # Errors
    ///
    /// Returns the translated provider error.
    #[instrument(
        skip_all,
        fields(
            customer_id = %request.customer_id,
            amount = %request.amount,
            currency = %request.currency
        )
    )]
    pub async fn add_payment(
        &self,
        request: &AddPayment,
        idempotency_key: Option<&str>,
    ) -> Result<Payment, PaymentError> {
        let charge = self
            .stripe
            .create_charge(&charge_params(request), idempotency_key)
            .await
            .inspect_err(|e| warn!(error = %e, "Charge failed"))?;

        info!(payment_id = %charge.id, "Payment created");
        Ok(payment_from(charge))
    }

    /// Look up a customer.
    ///
    /// # Errors
    ///
    /// Returns the translated provider error. A deleted customer is reported
    /// as an invalid request.
    #[instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn get_customer(&self, customer_id: &CustomerId) -> Result<Customer, PaymentError> {
        let customer = self
            .stripe
            .retrieve_customer(customer_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Customer lookup failed"))?;

        if customer.deleted {
            return Err(PaymentError::InvalidRequest {
                message: format!("Customer '{customer_id}' has been deleted."),
                param: None,
            });
        }

        Ok(customer_from(customer))
    }

    /// Look up a payment intent.
    ///
    /// # Errors
    ///
    /// Returns the translated provider error.
    #[instrument(skip_all, fields(payment_intent_id = %payment_intent_id))]
    pub async fn get_payment_intent(
        &self,
        payment_intent_id: &PaymentIntentId,
    ) -> Result<PaymentIntent, PaymentError> {
        let intent = self
            .stripe
            .retrieve_payment_intent(payment_intent_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Payment intent lookup failed"))?;

        Ok(payment_intent_from(intent))
    }
}

// =============================================================================
// Field mapping
// =============================================================================

/// The cardholder name sent to Stripe is the customer's name, not the
/// `creditCard.name` field of the request.
fn card_token_params(request: &AddCustomer) -> CardTokenParams<'_> {
    let card = &request.credit_card;
    CardTokenParams {
        name: &request.name,
        number: &card.card_number,
        exp_year: &card.expiration_year,
        exp_month: &card.expiration_month,
        cvc: &card.cvc,
    }
}

fn charge_params(request: &AddPayment) -> ChargeCreateParams<'_> {
    ChargeCreateParams {
        customer: request.customer_id.as_str(),
        receipt_email: request.receipt_email.as_str(),
        description: &request.description,
        currency: request.currency.as_str(),
        amount: request.amount.minor_units(),
    }
}

fn customer_from(customer: StripeCustomer) -> Customer {
    Customer {
        name: customer.name,
        email: customer.email,
        customer_id: customer.id,
    }
}

fn payment_from(charge: Charge) -> Payment {
    Payment {
        customer_id: charge.customer,
        receipt_email: charge.receipt_email,
        description: charge.description,
        currency: charge.currency,
        amount: charge.amount,
        payment_id: charge.id,
    }
}

fn payment_intent_from(intent: StripePaymentIntent) -> PaymentIntent {
    PaymentIntent {
        payment_intent_id: intent.id,
        amount: intent.amount,
        amount_received: intent.amount_received,
        currency: intent.currency,
        status: intent.status,
        customer_id: intent.customer,
        description: intent.description,
        receipt_email: intent.receipt_email,
        created: intent.created,
    }
}
