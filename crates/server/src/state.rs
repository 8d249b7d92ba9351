//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StripeConfig;
use crate::services::PaymentService;
use crate::stripe::{StripeClient, StripeError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Nothing in it is mutated
/// after start-up.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    payments: PaymentService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Stripe client cannot be built from `stripe`.
    pub fn new(stripe: &StripeConfig) -> Result<Self, StripeError> {
        let payments = PaymentService::new(StripeClient::new(stripe)?);

        Ok(Self {
            inner: Arc::new(AppStateInner { payments }),
        })
    }

    /// Get a reference to the payment service.
    #[must_use]
    pub fn payments(&self) -> &PaymentService {
        &self.inner.payments
    }
}
