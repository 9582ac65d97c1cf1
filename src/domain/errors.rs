//! Domain error types
//!
//! This module defines the error hierarchy for the inbound pipeline.
//! All errors are domain-specific and don't expose third-party types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main pipeline error type
///
/// This is the primary error type used throughout the crate.
/// It wraps the collaborator-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum EdiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Notification event could not be parsed or classified
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// Object store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Partnership and partner lookup errors
    #[error("Partnership error: {0}")]
    Partnership(#[from] PartnershipError),

    /// Transaction set routing errors
    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Document splitting errors
    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    /// Guide resolution errors
    #[error("Guide error: {0}")]
    Guide(#[from] GuideError),

    /// Transformation errors
    #[error("Transform error: {0}")]
    Transform(String),

    /// Destination delivery errors
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Control number issuance errors
    #[error("Counter error: {0}")]
    Counter(#[from] CounterError),

    /// Execution ledger errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Acknowledgment generation errors
    #[error("Acknowledgment error: {0}")]
    Acknowledgment(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Unexpected faults, including panics caught inside the pipeline
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EdiError {
    /// Short, stable name of the error category, used in processing reports
    pub fn kind(&self) -> &'static str {
        match self {
            EdiError::Configuration(_) => "configuration",
            EdiError::EventParse(_) => "event_parse",
            EdiError::Storage(_) => "storage",
            EdiError::Partnership(_) => "partnership",
            EdiError::Routing(_) => "routing",
            EdiError::Split(_) => "split",
            EdiError::Guide(_) => "guide",
            EdiError::Transform(_) => "transform",
            EdiError::Delivery(_) => "delivery",
            EdiError::Counter(_) => "counter",
            EdiError::Ledger(_) => "ledger",
            EdiError::Acknowledgment(_) => "acknowledgment",
            EdiError::Validation(_) => "validation",
            EdiError::Serialization(_) => "serialization",
            EdiError::Io(_) => "io",
            EdiError::Internal(_) => "internal",
        }
    }
}

/// Object store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object does not exist
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Failed to read an object
    #[error("Failed to read {bucket}/{key}: {message}")]
    ReadFailed {
        bucket: String,
        key: String,
        message: String,
    },

    /// Failed to write an object
    #[error("Failed to write {bucket}/{key}: {message}")]
    WriteFailed {
        bucket: String,
        key: String,
        message: String,
    },

    /// Failed to delete an object
    #[error("Failed to delete {bucket}/{key}: {message}")]
    DeleteFailed {
        bucket: String,
        key: String,
        message: String,
    },

    /// Key would escape the bucket root
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

/// Partnership and partner profile errors
#[derive(Debug, Error)]
pub enum PartnershipError {
    /// No partnership exists for the partner pair
    #[error("Partnership not found for '{sending_partner_id}' and '{receiving_partner_id}'")]
    NotFound {
        sending_partner_id: String,
        receiving_partner_id: String,
    },

    /// No partner profile is registered for an interchange id
    #[error("No partner profile found for interchange id '{0}'")]
    UnknownPartner(String),

    /// Partnership document could not be read or parsed
    #[error("Failed to load partnership: {0}")]
    LoadFailed(String),
}

/// Transaction set configuration integrity errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// No transaction set applies to the partner pair
    #[error("No transaction sets configured for '{sending_partner_id}' and '{receiving_partner_id}'")]
    NoMatchingConfiguration {
        sending_partner_id: String,
        receiving_partner_id: String,
    },

    /// No transaction set carries the resolved guide
    #[error("no matching transaction set config found for guide id: '{0}'")]
    NoMatchingGuide(String),

    /// A stored transaction set entry matches no known shape
    #[error("invalid transaction set configuration encountered: {0}")]
    InvalidConfiguration(String),

    /// The ack entry count is not exactly one
    #[error("expected exactly 1 acknowledgment transaction set configuration, found: {found}")]
    AckConfigCardinality { found: usize },
}

/// Document splitting errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    /// Content is not valid UTF-8 text
    #[error("Content is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// Content does not start with a complete ISA segment
    #[error("Missing or truncated ISA segment")]
    MissingInterchangeHeader,

    /// Segment found outside of its expected envelope
    #[error("Unexpected segment '{segment}' at position {position}")]
    UnexpectedSegment { segment: String, position: usize },

    /// Envelope was opened but never closed
    #[error("Unterminated {0} envelope")]
    Unterminated(String),

    /// Segment is missing a required element
    #[error("Segment '{segment}' is missing element {element}")]
    MissingElement { segment: String, element: usize },

    /// No functional groups were found
    #[error("No documents found in content")]
    Empty,
}

/// Guide resolution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuideError {
    /// No candidate guide matches the transaction set
    #[error("No guide found for transaction set '{transaction_set}' among {candidates} candidate(s)")]
    NoMatch {
        transaction_set: String,
        candidates: usize,
    },
}

/// Destination delivery errors
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Destination could not be reached
    #[error("Failed to reach destination {destination}: {message}")]
    Unreachable {
        destination: String,
        message: String,
    },

    /// Destination answered with a non-success status
    #[error("Destination {destination} rejected payload with status {status}")]
    Rejected { destination: String, status: u16 },

    /// Destination descriptor is not usable
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
}

/// Control number issuance errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    /// Store returned no value for the key
    #[error("Issue generating control number with key: {0}")]
    Issuance(String),

    /// Counter exceeded the fixed width
    #[error("Counter for key {key} exceeded {width} digits: {value}")]
    Overflow {
        key: String,
        value: u64,
        width: usize,
    },

    /// Increment amount must be positive
    #[error("Increment amount must be at least 1")]
    InvalidAmount,

    /// Store could not be read or written
    #[error("Counter store failure: {0}")]
    Store(String),
}

/// Execution ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Failed to write an execution record
    #[error("Failed to write execution {execution_id}: {message}")]
    WriteFailed {
        execution_id: String,
        message: String,
    },

    /// Failed to read execution records
    #[error("Failed to read executions: {0}")]
    ReadFailed(String),
}

/// Serializable error detail stored in processing reports and ledger records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error category (see [`EdiError::kind`])
    pub kind: String,

    /// Human-readable message
    pub message: String,
}

impl ErrorDetail {
    /// Creates a new error detail
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<&EdiError> for ErrorDetail {
    fn from(err: &EdiError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for EdiError {
    fn from(err: std::io::Error) -> Self {
        EdiError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for EdiError {
    fn from(err: serde_json::Error) -> Self {
        EdiError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for EdiError {
    fn from(err: toml::de::Error) -> Self {
        EdiError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edi_error_display() {
        let err = EdiError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_routing_error_conversion() {
        let routing_err = RoutingError::NoMatchingGuide("guide-1".to_string());
        let err: EdiError = routing_err.into();
        assert!(matches!(err, EdiError::Routing(_)));
        assert_eq!(err.kind(), "routing");
    }

    #[test]
    fn test_ack_cardinality_message() {
        let err = RoutingError::AckConfigCardinality { found: 2 };
        assert_eq!(
            err.to_string(),
            "expected exactly 1 acknowledgment transaction set configuration, found: 2"
        );
    }

    #[test]
    fn test_error_detail_from_error() {
        let err: EdiError = SplitError::Empty.into();
        let detail = ErrorDetail::from(&err);
        assert_eq!(detail.kind, "split");
        assert_eq!(detail.message, "Split error: No documents found in content");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: EdiError = io_err.into();
        assert!(matches!(err, EdiError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: EdiError = json_err.into();
        assert!(matches!(err, EdiError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: EdiError = toml_err.into();
        assert!(matches!(err, EdiError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_edi_error_implements_std_error() {
        let err = EdiError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
