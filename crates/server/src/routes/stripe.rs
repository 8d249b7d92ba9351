//! Stripe facade route handlers.
//!
//! Each handler is a pass-through to [`PaymentService`]: decode the body or
//! path, call the service, return the record as JSON. Provider failures
//! become `400 Bad Request` via [`AppError`].
//!
//! [`PaymentService`]: crate::services::PaymentService

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
};
use paybridge_core::{
    AddCustomer, AddPayment, Customer, CustomerId, Payment, PaymentIntent, PaymentIntentId,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::stripe::IDEMPOTENCY_KEY_HEADER;

/// Longest idempotency key Stripe accepts.
const MAX_IDEMPOTENCY_KEY_LEN: usize = 255;

/// Register a customer at Stripe with the supplied card as payment source.
#[instrument(skip_all)]
pub async fn add_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<AddCustomer>, JsonRejection>,
) -> Result<Json<Customer>> {
    let Json(request) = payload?;
    let idempotency_key = idempotency_key(&headers)?;

    let customer = state.payments().add_customer(&request, idempotency_key).await?;

    Ok(Json(customer))
}

/// Charge a customer that already exists at Stripe.
#[instrument(skip_all)]
pub async fn add_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<AddPayment>, JsonRejection>,
) -> Result<Json<Payment>> {
    let Json(request) = payload?;
    let idempotency_key = idempotency_key(&headers)?;

    let payment = state.payments().add_payment(&request, idempotency_key).await?;

    Ok(Json(payment))
}

/// Fetch a customer by its Stripe id.
#[instrument(skip(state))]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Customer>> {
    let customer_id =
        CustomerId::parse(&customer_id).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let customer = state.payments().get_customer(&customer_id).await?;
    Ok(Json(customer))
}

/// Fetch a payment intent by its Stripe id.
#[instrument(skip(state))]
pub async fn get_payment_intent(
    State(state): State<AppState>,
    Path(payment_intent_id): Path<String>,
) -> Result<Json<PaymentIntent>> {
    let payment_intent_id = PaymentIntentId::parse(&payment_intent_id)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let intent = state.payments().get_payment_intent(&payment_intent_id).await?;
    Ok(Json(intent))
}

/// Read the optional `Idempotency-Key` header.
fn idempotency_key(headers: &HeaderMap) -> Result<Option<&str>> {
    let Some(value) = headers.get(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(None);
    };

    let key = value
        .to_str()
        .map_err(|_| AppError::BadRequest("Idempotency-Key must be visible ASCII".to_string()))?
        .trim();

    if key.is_empty() || key.len() > MAX_IDEMPOTENCY_KEY_LEN {
        return Err(AppError::BadRequest(format!(
            "Idempotency-Key must be 1-{MAX_IDEMPOTENCY_KEY_LEN} characters"
        )));
    }

    Ok(Some(key))
}
