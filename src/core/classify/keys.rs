//! Notification key classification
//!
//! Splits notification records into keys that will be processed (objects
//! directly inside an `inbound` directory) and keys that are ignored.

use crate::domain::event::NotificationRecord;
use crate::domain::{EdiError, Result};
use serde::{Deserialize, Serialize};

/// Directory name that marks an object as inbound
pub const INBOUND_DIRECTORY: &str = "inbound";

/// Reason reported for folder notifications
pub const FOLDER_REASON: &str = "key represents a folder";

/// Reason reported for objects outside an inbound directory
pub const NOT_INBOUND_REASON: &str = "key does not match an item in an inbound directory";

/// A notification that will not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredKey {
    /// Key as reported by the notification
    pub key: String,

    /// Why the key was skipped
    pub reason: String,
}

/// A notification accepted for processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyToProcess {
    pub bucket_name: String,

    /// Decoded object key
    pub key: String,
}

/// Partition of one event's records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedEventKeys {
    pub filtered_keys: Vec<FilteredKey>,
    pub keys_to_process: Vec<KeyToProcess>,
}

/// Classifies notification records
///
/// Rules are applied in order per record:
/// 1. keys ending in `/` are folders
/// 2. keys whose parent directory is not `inbound` are ignored
/// 3. everything else is decoded and kept, preserving input order
///
/// # Errors
///
/// Returns [`EdiError::EventParse`] if a key decodes to invalid UTF-8.
pub fn classify(records: &[NotificationRecord]) -> Result<GroupedEventKeys> {
    let mut grouped = GroupedEventKeys::default();

    for record in records {
        let event_key = record.object_key();

        if event_key.ends_with('/') {
            grouped.filtered_keys.push(FilteredKey {
                key: event_key.to_string(),
                reason: FOLDER_REASON.to_string(),
            });
            continue;
        }

        let segments: Vec<&str> = event_key.split('/').collect();
        if segments.len() < 2 || segments[segments.len() - 2] != INBOUND_DIRECTORY {
            grouped.filtered_keys.push(FilteredKey {
                key: event_key.to_string(),
                reason: NOT_INBOUND_REASON.to_string(),
            });
            continue;
        }

        grouped.keys_to_process.push(KeyToProcess {
            bucket_name: record.bucket_name().to_string(),
            key: decode_object_key(event_key)?,
        });
    }

    Ok(grouped)
}

/// Decodes a URI-encoded object key
///
/// `+` encodes a space, so it is replaced before percent-decoding; a literal
/// plus arrives as `%2B` and survives. A `%` not followed by two hex digits
/// is rejected, as is an escape sequence that decodes to invalid UTF-8.
pub fn decode_object_key(object_key: &str) -> Result<String> {
    if let Some(position) = malformed_escape(object_key) {
        return Err(EdiError::EventParse(format!(
            "failed to decode object key '{object_key}': malformed escape at byte {position}"
        )));
    }

    let spaced = object_key.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| EdiError::EventParse(format!("failed to decode object key '{object_key}': {e}")))
}

/// Byte offset of the first `%` that does not start a `%XX` escape
fn malformed_escape(object_key: &str) -> Option<usize> {
    let bytes = object_key.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        let well_formed = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        (b == b'%' && !well_formed).then_some(i)
    })
}
