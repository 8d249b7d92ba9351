//! Newtype IDs for provider-issued identifiers.
//!
//! The payment provider hands out opaque string identifiers (`cus_...`,
//! `ch_...`, `pi_...`, `tok_...`). Use the `define_provider_id!` macro to
//! create type-safe wrappers that prevent accidentally passing a charge id
//! where a customer id is expected.

use thiserror::Error;

/// Errors that can occur when parsing a provider identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The identifier is empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Name of the identifier type.
        kind: &'static str,
    },
}

/// Macro to define a type-safe provider identifier.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` (deserialization rejects empty values)
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()`, `as_str()`, `into_inner()`
/// - `Display`, `FromStr`, `AsRef<str>` and `TryFrom<String>`
///
/// The identifier is opaque: only non-emptiness is checked, the provider
/// decides whether it refers to anything.
///
/// # Example
///
/// ```rust
/// # use paybridge_core::define_provider_id;
/// define_provider_id!(RefundId);
///
/// let id = RefundId::parse("re_123").unwrap();
/// assert_eq!(id.as_str(), "re_123");
/// assert!(RefundId::parse("  ").is_err());
/// ```
#[macro_export]
macro_rules! define_provider_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the identifier is empty.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::IdError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::IdError::Empty {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::IdError;

            fn try_from(value: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Identifiers issued by the payment provider
define_provider_id!(CustomerId);
define_provider_id!(PaymentId);
define_provider_id!(PaymentIntentId);
define_provider_id!(CardTokenId);
