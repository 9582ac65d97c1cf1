//! Invocation results
//!
//! [`ProcessingResults`] accumulates per-key outcomes during a run;
//! [`InvocationOutcome`] is what a run hands back to its caller.

use crate::core::classify::FilteredKey;
use crate::core::execution::ExecutionFailure;
use crate::domain::errors::ErrorDetail;
use serde::{Deserialize, Serialize};

/// A key that failed, with the error that stopped it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingError {
    pub key: String,
    pub error: ErrorDetail,
}

/// Batch-level aggregate of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResults {
    /// Notifications excluded by classification
    pub filtered_keys: Vec<FilteredKey>,

    /// Keys fully processed and deleted, in processing order
    pub processed_keys: Vec<String>,

    pub processing_errors: Vec<ProcessingError>,
}

impl ProcessingResults {
    pub fn new(filtered_keys: Vec<FilteredKey>) -> Self {
        Self {
            filtered_keys,
            ..Self::default()
        }
    }

    pub fn record_processed(&mut self, key: impl Into<String>) {
        self.processed_keys.push(key.into());
    }

    pub fn record_error(&mut self, key: impl Into<String>, error: ErrorDetail) {
        self.processing_errors.push(ProcessingError {
            key: key.into(),
            error,
        });
    }

    pub fn error_count(&self) -> usize {
        self.processing_errors.len()
    }

    /// Log the results
    pub fn log_summary(&self) {
        tracing::info!(
            filtered = self.filtered_keys.len(),
            processed = self.processed_keys.len(),
            failed = self.processing_errors.len(),
            "Processing completed"
        );

        for error in &self.processing_errors {
            tracing::warn!(
                key = %error.key,
                kind = %error.error.kind,
                message = %error.error.message,
                "Key failed"
            );
        }
    }
}

/// Message recorded when some keys failed
///
/// ```
/// use edi_inbound::core::pipeline::failure_message;
///
/// assert_eq!(
///     failure_message(1, 3),
///     "encountered 1 error while attempting to process 3 keys"
/// );
/// ```
pub fn failure_message(error_count: usize, key_count: usize) -> String {
    let plural = |count: usize| if count > 1 { "s" } else { "" };
    format!(
        "encountered {error_count} error{} while attempting to process {key_count} key{}",
        plural(error_count),
        plural(key_count)
    )
}

/// Result of one invocation; never an unhandled error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// Every key processed
    Succeeded(ProcessingResults),

    /// At least one key failed; the execution is marked failed
    PartiallyFailed {
        failure: ExecutionFailure,
        results: ProcessingResults,
    },

    /// The invocation failed before or outside per-key processing
    Failed(ExecutionFailure),
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Per-key results, when the run got that far
    pub fn results(&self) -> Option<&ProcessingResults> {
        match self {
            Self::Succeeded(results) | Self::PartiallyFailed { results, .. } => Some(results),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ExecutionFailure> {
        match self {
            Self::Succeeded(_) => None,
            Self::PartiallyFailed { failure, .. } | Self::Failed(failure) => Some(failure),
        }
    }
}
