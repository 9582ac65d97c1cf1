//! Notification classification
//!
//! Turns raw notification records into work items for the pipeline.

pub mod keys;

pub use keys::{
    classify, decode_object_key, FilteredKey, GroupedEventKeys, KeyToProcess, FOLDER_REASON,
    INBOUND_DIRECTORY, NOT_INBOUND_REASON,
};
