//! Raw card details supplied when registering a customer.
//!
//! Card details only pass through this service on their way to the
//! provider's tokenization endpoint. They are never stored, and `Debug`
//! never prints the full number or the CVC.

use serde::{Deserialize, Serialize};

/// Card details as received from the client.
///
/// Field values are forwarded verbatim; the provider validates them and
/// reports problems as card errors.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Cardholder name.
    pub name: String,
    /// Primary account number.
    pub card_number: String,
    /// Expiration year (two or four digits).
    pub expiration_year: String,
    /// Expiration month (1-12).
    pub expiration_month: String,
    /// Card verification code.
    pub cvc: String,
}

impl CardDetails {
    /// Last four characters of the card number, for logs and diagnostics.
    #[must_use]
    pub fn last4(&self) -> &str {
        let number = self.card_number.trim();
        let start = number
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(idx, _)| idx);
        number.get(start..).unwrap_or_default()
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("name", &self.name)
            .field("card_number", &format_args!("**** {}", self.last4()))
            .field("expiration_year", &self.expiration_year)
            .field("expiration_month", &self.expiration_month)
            .field("cvc", &"[REDACTED]")
            .finish()
    }
}
