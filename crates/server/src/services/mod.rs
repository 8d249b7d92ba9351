//! Business logic services.
//!
//! # Services
//!
//! - `payments` - Customer registration, charges and lookups through Stripe

pub mod payments;

pub use payments::{PaymentError, PaymentService};
