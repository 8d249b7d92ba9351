//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                      - Liveness check
//!
//! # Stripe facade (JSON)
//! POST /api/stripe/customer/add                     - Register customer with card
//! POST /api/stripe/payment/add                      - Charge existing customer
//! GET  /api/stripe/customer/{customerId}            - Fetch customer
//! GET  /api/stripe/paymentIntent/{paymentIntentId}  - Fetch payment intent
//! ```

pub mod stripe;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the Stripe facade routes router.
pub fn stripe_routes() -> Router<AppState> {
    Router::new()
        .route("/customer/add", post(stripe::add_customer))
        .route("/payment/add", post(stripe::add_payment))
        .route("/customer/{customer_id}", get(stripe::get_customer))
        .route(
            "/paymentIntent/{payment_intent_id}",
            get(stripe::get_payment_intent),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/stripe", stripe_routes())
}
