//! Paybridge Core - Shared value types.
//!
//! This crate provides the records exchanged across the Paybridge facade:
//! - inbound request bodies (`AddCustomer`, `AddPayment`)
//! - outbound response records (`Customer`, `Payment`, `PaymentIntent`)
//! - the value types they are built from (ids, email, money, card details)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no provider
//! wire formats. Every record is an immutable value that lives for a single
//! request/response cycle.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for provider ids, emails, currency and amounts
//! - [`records`] - Request and response records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod types;

pub use records::*;
pub use types::*;
