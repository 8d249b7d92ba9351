//! Stripe API integration.
//!
//! # Modules
//!
//! - `client` - `reqwest`-based REST client, one method per endpoint
//! - `types` - Form-encoded request parameters and response objects
//! - `error` - Transport and API errors, with error classification

pub mod client;
pub mod error;
pub mod types;

pub use client::{IDEMPOTENCY_KEY_HEADER, StripeClient};
pub use error::{ErrorKind, StripeError};
