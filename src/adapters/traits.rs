//! Collaborator traits
//!
//! The pipeline only talks to the outside world through these traits. Each
//! one is held as an `Arc<dyn Trait + Send + Sync>` so tests can swap in fakes.

use crate::core::execution::{ExecutionFailure, ExecutionRecord, ExecutionStatus};
use crate::domain::errors::ErrorDetail;
use crate::domain::ids::{ExecutionId, GuideId, MappingId, PartnerId};
use crate::domain::partnership::{DestinationTarget, GuideSummary, Partnership};
use crate::domain::{EdiDocument, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Bucket/key object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads an object
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::StorageError::NotFound`] if the object does not exist.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Writes an object, replacing any existing content
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;

    /// Deletes an object
    async fn delete(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Loads partnership routing configuration
#[async_trait]
pub trait PartnershipStore: Send + Sync {
    /// Loads the partnership for a sending/receiving pair
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PartnershipError::NotFound`] if no partnership exists.
    async fn load(
        &self,
        sending_partner_id: &PartnerId,
        receiving_partner_id: &PartnerId,
    ) -> Result<Partnership>;
}

/// Maps interchange sender/receiver ids to partner ids
#[async_trait]
pub trait PartnerResolver: Send + Sync {
    async fn resolve(&self, interchange_id: &str) -> Result<PartnerId>;
}

/// Splits raw content into one document per functional group
pub trait DocumentSplitter: Send + Sync {
    fn split(&self, content: &str) -> Result<Vec<EdiDocument>>;
}

/// Resolves the mapping guide for a transaction set
#[async_trait]
pub trait GuideResolver: Send + Sync {
    /// Picks the guide among `candidates` that handles `transaction_set`
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::GuideError::NoMatch`] if no candidate matches.
    async fn resolve(&self, candidates: &[GuideId], transaction_set: &str)
        -> Result<GuideSummary>;
}

/// Transforms a raw document with a guide and optional mapping
#[async_trait]
pub trait TransformEngine: Send + Sync {
    async fn transform(
        &self,
        guide_id: &GuideId,
        edi: &str,
        mapping_id: Option<&MappingId>,
    ) -> Result<Value>;
}

/// Delivers a transformed payload to a destination
#[async_trait]
pub trait DestinationSink: Send + Sync {
    async fn deliver(&self, destination: &DestinationTarget, payload: &Value) -> Result<()>;
}

/// Records execution lifecycle transitions
///
/// Implementations may skip writes under loop detection; callers must not
/// depend on a write having happened.
#[async_trait]
pub trait ExecutionLedger: Send + Sync {
    async fn record_new(&self, execution_id: &ExecutionId, input: &Value) -> Result<()>;

    async fn mark_successful(&self, execution_id: &ExecutionId) -> Result<()>;

    /// Records a failure and returns the structured failure for the caller
    async fn record_failed(
        &self,
        execution_id: &ExecutionId,
        error: ErrorDetail,
    ) -> Result<ExecutionFailure>;

    /// Lists records, optionally filtered by status
    async fn list(&self, status: Option<ExecutionStatus>) -> Result<Vec<ExecutionRecord>>;
}

/// Fire-and-forget checkpoint sink
pub trait ProgressTracker: Send + Sync {
    fn track(&self, checkpoint: &str, payload: Value);
}

/// Keyed counter persistence
///
/// `increment` must be atomic per key. `None` means the store could not
/// produce a value.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn increment(&self, key: &str, amount: u64) -> Result<Option<u64>>;
}
