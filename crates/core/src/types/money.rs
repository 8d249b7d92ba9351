//! Currency codes and charge amounts.
//!
//! Amounts are always expressed in the currency's smallest unit (cents for
//! USD, yen for JPY), the same representation the payment provider uses.
//! No decimal arithmetic happens in this service, amounts are passed through.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing money values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Currency code is not three ASCII letters.
    #[error("currency must be a three-letter ISO 4217 code (got {0:?})")]
    InvalidCurrency(String),
    /// Amount is zero or negative.
    #[error("amount must be a positive number of minor units (got {0})")]
    NonPositiveAmount(i64),
}

/// ISO 4217 currency code, normalized to lowercase.
///
/// The provider accepts any case but reports codes in lowercase, so
/// normalizing keeps request and response records comparable.
///
/// ```
/// use paybridge_core::Currency;
///
/// let usd = Currency::parse("USD").unwrap();
/// assert_eq!(usd.as_str(), "usd");
/// assert!(Currency::parse("dollars").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parse a currency code.
    ///
    /// # Errors
    ///
    /// Returns an error unless the trimmed input is exactly three ASCII letters.
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let code = s.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MoneyError::InvalidCurrency(s.to_owned()));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Returns the lowercase currency code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

/// A charge amount in the currency's smallest unit.
///
/// Must be strictly positive. Provider-side minimums (e.g. 50 cents for USD)
/// are not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if `minor_units` is zero or negative.
    pub const fn new(minor_units: i64) -> Result<Self, MoneyError> {
        if minor_units <= 0 {
            return Err(MoneyError::NonPositiveAmount(minor_units));
        }
        Ok(Self(minor_units))
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Amount {
    type Error = MoneyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
