//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions) - added in `main`
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (record in span, echo in response)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
