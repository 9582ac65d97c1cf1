//! Bucket notification event model
//!
//! Mirrors the subset of the storage notification payload the pipeline needs:
//! one record per object event, carrying the bucket name and the URI-encoded key.

use super::errors::EdiError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A batch of storage notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Notification records in delivery order
    #[serde(rename = "Records")]
    pub records: Vec<NotificationRecord>,
}

impl NotificationEvent {
    /// Parses a raw invocation payload
    ///
    /// # Errors
    ///
    /// Returns [`EdiError::EventParse`] if the payload does not have the
    /// `{ Records: [{ s3: { bucket: { name }, object: { key } } }] }` shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| EdiError::EventParse(format!("invalid bucket notification event: {e}")))
    }
}

/// One reported storage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Event name as reported by the store (e.g. `ObjectCreated:Put`)
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    /// Bucket and object details
    pub s3: StorageEntity,
}

impl NotificationRecord {
    /// Creates a record for a created object
    pub fn created(bucket_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            event_name: Some("ObjectCreated:Put".to_string()),
            s3: StorageEntity {
                bucket: BucketEntity {
                    name: bucket_name.into(),
                },
                object: ObjectEntity {
                    key: key.into(),
                    size: None,
                },
            },
        }
    }

    /// Bucket name of the record
    pub fn bucket_name(&self) -> &str {
        &self.s3.bucket.name
    }

    /// Object key exactly as reported (URI-encoded)
    pub fn object_key(&self) -> &str {
        &self.s3.object.key
    }

    /// Classifies the event name
    pub fn event_type(&self) -> EventType {
        match self.event_name.as_deref() {
            Some(name) if name.starts_with("ObjectCreated") => EventType::Created,
            _ => EventType::Other,
        }
    }
}

/// Kind of storage event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Object was created or overwritten
    Created,
    /// Any other event
    Other,
}

/// Storage section of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageEntity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

/// Bucket details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

/// Object details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntity {
    /// URI-encoded object key
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}
