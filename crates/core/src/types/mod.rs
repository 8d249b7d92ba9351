//! Core value types for Paybridge.
//!
//! This module provides type-safe wrappers for the values carried by
//! request and response records.

pub mod card;
pub mod email;
pub mod id;
pub mod money;

pub use card::CardDetails;
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Amount, Currency, MoneyError};
