//! Progress checkpoints
//!
//! Every checkpoint becomes one `info` event on the `edi_inbound::progress`
//! target, with the payload rendered as JSON.

use crate::adapters::traits::ProgressTracker;
use serde_json::Value;

/// Target used for checkpoint events
pub const PROGRESS_TARGET: &str = "edi_inbound::progress";

/// Emits checkpoints as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressTracker;

impl ProgressTracker for TracingProgressTracker {
    fn track(&self, checkpoint: &str, payload: Value) {
        tracing::info!(
            target: PROGRESS_TARGET,
            checkpoint = checkpoint,
            payload = %payload,
            "Checkpoint"
        );
    }
}
