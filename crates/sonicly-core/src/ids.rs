//! Identifier types.
//!
//! All identifiers are opaque strings. They end up as URL path segments on the
//! record store and as parts of local cache keys, so parsing rejects anything
//! that could escape either namespace.
//!
//! # Macro-based ID Types
//!
//! The `string_id_type!` macro reduces boilerplate for the identifier newtypes,
//! ensuring consistent serialization, parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Maximum accepted identifier length.
pub const MAX_ID_LEN: usize = 128;

/// Macro to define a string identifier with standard trait implementations.
///
/// With `prefix = "..."`, the type also gets a `generate()` constructor producing
/// `<prefix>_<lowercase ulid>`.
macro_rules! string_id_type {
    ($name:ident, prefix = $prefix:literal, $doc:expr) => {
        string_id_type!($name, $doc);

        impl $name {
            /// Prefix used by generated identifiers.
            pub const PREFIX: &'static str = $prefix;

            /// Generate a new identifier with the current timestamp.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, Ulid::new().to_string().to_lowercase()))
            }
        }
    };
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier, validating its characters.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is empty, too long, or contains
            /// characters outside `[A-Za-z0-9_.@-]`.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                validate(&value)?;
                Ok(Self(value))
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
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

string_id_type!(UserId, "A resolved user identifier supplied by the authentication layer.");
string_id_type!(SubscriptionId, prefix = "sub", "A subscription identifier, unique within a user's scope.");
string_id_type!(PaymentMethodId, prefix = "pm", "A payment method identifier.");
string_id_type!(BillingRecordId, prefix = "inv", "A billing record (invoice) identifier.");

fn validate(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.len() > MAX_ID_LEN {
        return Err(IdError::TooLong { len: value.len() });
    }
    if value.starts_with('.') {
        return Err(IdError::InvalidCharacter('.'));
    }
    match value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@')))
    {
        Some(c) => Err(IdError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is empty.
    #[error("identifier is empty")]
    Empty,

    /// The input exceeds [`MAX_ID_LEN`].
    #[error("identifier too long: {len} bytes")]
    TooLong {
        /// Length of the rejected input.
        len: usize,
    },

    /// The input contains a character that is not allowed.
    #[error("identifier contains invalid character {0:?}")]
    InvalidCharacter(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix() {
        let id = SubscriptionId::generate();
        assert!(id.as_str().starts_with("sub_"));
        assert!(PaymentMethodId::generate().as_str().starts_with("pm_"));
        assert!(BillingRecordId::generate().as_str().starts_with("inv_"));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(SubscriptionId::generate(), SubscriptionId::generate());
    }

    #[test]
    fn user_id_accepts_common_forms() {
        assert!(UserId::new("user_1").is_ok());
        assert!(UserId::new("priya@oksbi").is_ok());
        assert!(UserId::new("3f1c9a1e-8d7c-4c55-9d57-0a1b2c3d4e5f").is_ok());
    }

    #[test]
    fn rejects_path_like_ids() {
        assert_eq!(UserId::new(""), Err(IdError::Empty));
        assert_eq!(UserId::new("a/b"), Err(IdError::InvalidCharacter('/')));
        assert_eq!(UserId::new("../etc"), Err(IdError::InvalidCharacter('.')));
        assert_eq!(UserId::new("a b"), Err(IdError::InvalidCharacter(' ')));
        assert!(matches!(
            UserId::new("x".repeat(MAX_ID_LEN + 1)),
            Err(IdError::TooLong { .. })
        ));
    }

    #[test]
    fn serde_rejects_invalid_ids() {
        let parsed: Result<SubscriptionId, _> = serde_json::from_str("\"bad/id\"");
        assert!(parsed.is_err());

        let id: SubscriptionId = serde_json::from_str("\"sub_premium_monthly\"").unwrap();
        assert_eq!(id.as_str(), "sub_premium_monthly");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sub_premium_monthly\"");
    }
}
