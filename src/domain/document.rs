//! EDI document model
//!
//! An [`EdiDocument`] is one logical document extracted from a raw file by the
//! document splitter. It is immutable once produced.

use serde::{Deserialize, Serialize};

/// One logical document extracted from a raw file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdiDocument {
    /// Routing metadata
    pub metadata: DocumentMetadata,

    /// Raw document content
    pub edi: String,
}

impl EdiDocument {
    /// Creates a document without envelope details
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        code: impl Into<String>,
        edi: impl Into<String>,
    ) -> Self {
        Self {
            metadata: DocumentMetadata {
                sender_id: sender_id.into(),
                receiver_id: receiver_id.into(),
                code: code.into(),
                envelope: None,
            },
            edi: edi.into(),
        }
    }
}

/// Routing metadata of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Interchange sender identifier
    pub sender_id: String,

    /// Interchange receiver identifier
    pub receiver_id: String,

    /// Transaction set code (e.g. `850`)
    pub code: String,

    /// Envelope headers, when the splitter provides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<Envelope>,
}

/// Interchange and functional group headers surrounding a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub separators: Separators,
    pub interchange: InterchangeHeader,
    pub group: FunctionalGroupHeader,
    pub transaction_sets: Vec<TransactionSetHeader>,
}

/// Delimiters declared by the ISA segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Separators {
    pub element: char,
    pub component: char,
    pub segment: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            element: '*',
            component: '>',
            segment: '~',
        }
    }
}

/// ISA header fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeHeader {
    pub sender_qualifier: String,
    pub sender_id: String,
    pub receiver_qualifier: String,
    pub receiver_id: String,
    pub version: String,
    pub control_number: String,
    pub usage_indicator: String,
}

/// GS header fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalGroupHeader {
    pub functional_id_code: String,
    pub application_sender: String,
    pub application_receiver: String,
    pub control_number: String,
    pub version: String,
}

/// ST header fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSetHeader {
    pub code: String,
    pub control_number: String,
}
