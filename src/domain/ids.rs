//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that flow through routing. Each type
//! rejects empty values so a blank id never reaches a lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting blank values
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

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

string_id!(
    /// Trading partner identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use edi_inbound::domain::ids::PartnerId;
    /// use std::str::FromStr;
    ///
    /// let partner = PartnerId::from_str("acme-retail").unwrap();
    /// assert_eq!(partner.as_str(), "acme-retail");
    /// ```
    PartnerId,
    "Partner ID"
);

string_id!(
    /// Mapping guide identifier
    GuideId,
    "Guide ID"
);

string_id!(
    /// Mapping identifier used when transforming for a destination
    MappingId,
    "Mapping ID"
);

string_id!(
    /// Execution identifier, derived from the invocation input
    ExecutionId,
    "Execution ID"
);

impl ExecutionId {
    /// Wraps a hex digest, which is never blank
    pub(crate) fn from_digest(digest: String) -> Self {
        Self(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_id_valid() {
        let id = PartnerId::new("acme").unwrap();
        assert_eq!(id.as_str(), "acme");
        assert_eq!(id.to_string(), "acme");
    }

    #[test]
    fn test_partner_id_empty() {
        assert!(PartnerId::new("").is_err());
        assert!(PartnerId::new("   ").is_err());
    }

    #[test]
    fn test_guide_id_error_message() {
        let err = GuideId::new("").unwrap_err();
        assert_eq!(err, "Guide ID cannot be empty");
    }

    #[test]
    fn test_ids_deserialize_with_validation() {
        let ok: MappingId = serde_json::from_str("\"01HMAP\"").unwrap();
        assert_eq!(ok.as_str(), "01HMAP");

        let err = serde_json::from_str::<MappingId>("\"\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = ExecutionId::new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
