//! Inbound pipeline orchestrator
//!
//! Drives one invocation: record the execution, classify the notification,
//! then fetch, split, route, transform and deliver each inbound key in order.
//! A failing key is recorded and skipped; the run itself always returns an
//! [`InvocationOutcome`].

use crate::adapters::traits::{
    DestinationSink, DocumentSplitter, ExecutionLedger, GuideResolver, ObjectStore,
    PartnerResolver, PartnershipStore, ProgressTracker, TransformEngine,
};
use crate::core::ack::FunctionalAcknowledger;
use crate::core::classify::{classify, KeyToProcess};
use crate::core::execution::{generate_execution_id, ExecutionFailure};
use crate::core::pipeline::results::{failure_message, InvocationOutcome, ProcessingResults};
use crate::core::routing::{
    group_by_guide_binding, select_ack, select_by_guide_id, select_for_partnership,
};
use crate::domain::errors::{ErrorDetail, SplitError};
use crate::domain::event::NotificationEvent;
use crate::domain::ids::ExecutionId;
use crate::domain::partnership::PartnerScope;
use crate::domain::{EdiError, Result};
use futures::FutureExt;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// External collaborators of the pipeline
#[derive(Clone)]
pub struct PipelineCollaborators {
    pub object_store: Arc<dyn ObjectStore + Send + Sync>,
    pub partnership_store: Arc<dyn PartnershipStore + Send + Sync>,
    pub partner_resolver: Arc<dyn PartnerResolver + Send + Sync>,
    pub splitter: Arc<dyn DocumentSplitter + Send + Sync>,
    pub guide_resolver: Arc<dyn GuideResolver + Send + Sync>,
    pub transform_engine: Arc<dyn TransformEngine + Send + Sync>,
    pub destination_sink: Arc<dyn DestinationSink + Send + Sync>,
    pub ledger: Arc<dyn ExecutionLedger + Send + Sync>,
    pub progress: Arc<dyn ProgressTracker + Send + Sync>,
}

/// Processes inbound notification events
pub struct InboundPipeline {
    function_name: String,
    collaborators: PipelineCollaborators,
    acknowledger: Option<FunctionalAcknowledger>,
}

impl InboundPipeline {
    /// Create a new pipeline
    ///
    /// # Arguments
    ///
    /// * `function_name` - Name mixed into execution ids and progress checkpoints
    /// * `collaborators` - External systems the pipeline talks to
    pub fn new(function_name: impl Into<String>, collaborators: PipelineCollaborators) -> Self {
        Self {
            function_name: function_name.into(),
            collaborators,
            acknowledger: None,
        }
    }

    /// Enables 997 acknowledgments for partnerships with an ack entry
    pub fn with_acknowledger(mut self, acknowledger: FunctionalAcknowledger) -> Self {
        self.acknowledger = Some(acknowledger);
        self
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Handles one notification event
    ///
    /// Never returns an error and never lets a collaborator panic escape: any
    /// failure ends up in the returned outcome and in the execution ledger.
    pub async fn handle(&self, event: Value) -> InvocationOutcome {
        let execution_id = generate_execution_id(&self.function_name, &event);
        self.track(
            &format!("starting {}", self.function_name),
            json!({ "input": event, "executionId": execution_id }),
        );
        tracing::info!(execution_id = %execution_id, function = %self.function_name, "Starting invocation");

        let run = AssertUnwindSafe(self.run(&execution_id, &event))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(panic_error(panic)));

        match run {
            Ok(outcome) => outcome,
            Err(error) => {
                let detail = ErrorDetail::from(&error);
                self.track(
                    "handler error",
                    json!({ "error": detail, "executionId": execution_id }),
                );
                tracing::error!(execution_id = %execution_id, error = %error, "Invocation failed");
                InvocationOutcome::Failed(self.fail(&execution_id, detail).await)
            }
        }
    }

    async fn run(&self, execution_id: &ExecutionId, event: &Value) -> Result<InvocationOutcome> {
        let ledger = &self.collaborators.ledger;
        ledger.record_new(execution_id, event).await?;

        let notification = NotificationEvent::from_value(event)?;
        let grouped = classify(&notification.records)?;
        self.track(
            "grouped event keys",
            json!({ "groupedEventKeys": grouped, "executionId": execution_id }),
        );

        let mut results = ProcessingResults::new(grouped.filtered_keys.clone());

        for key in &grouped.keys_to_process {
            let outcome = AssertUnwindSafe(self.process_key(execution_id, key))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(panic_error(panic)));

            match outcome {
                Ok(()) => {
                    tracing::info!(bucket = %key.bucket_name, key = %key.key, "Processed key");
                    results.record_processed(key.key.clone());
                }
                Err(error) => {
                    let detail = ErrorDetail::from(&error);
                    self.track(
                        "error processing document",
                        json!({ "key": key.key, "error": detail, "executionId": execution_id }),
                    );
                    tracing::warn!(key = %key.key, error = %error, "Failed to process key");
                    results.record_error(key.key.clone(), detail);
                }
            }
        }

        results.log_summary();

        let error_count = results.error_count();
        if error_count > 0 {
            let message = failure_message(error_count, grouped.keys_to_process.len());
            let failure = self
                .fail(execution_id, ErrorDetail::new("processing", message))
                .await;
            return Ok(InvocationOutcome::PartiallyFailed { failure, results });
        }

        // a failed transition keeps the results
        if let Err(error) = ledger.mark_successful(execution_id).await {
            tracing::error!(execution_id = %execution_id, error = %error, "Failed to record successful execution");
        }
        self.track(
            "results",
            json!({ "results": results, "executionId": execution_id }),
        );

        Ok(InvocationOutcome::Succeeded(results))
    }

    /// Runs every step for one key; any error aborts the key
    async fn process_key(&self, execution_id: &ExecutionId, key: &KeyToProcess) -> Result<()> {
        let c = &self.collaborators;

        let raw = c.object_store.get(&key.bucket_name, &key.key).await?;
        let content =
            String::from_utf8(raw).map_err(|e| SplitError::InvalidEncoding(e.to_string()))?;

        let documents = c.splitter.split(&content)?;
        self.track(
            "split edi documents",
            json!({ "key": key.key, "ediDocuments": documents, "executionId": execution_id }),
        );

        // all documents of one file are assumed to share the first one's partners
        let first = documents.first().ok_or(SplitError::Empty)?;
        let sending_partner_id = c.partner_resolver.resolve(&first.metadata.sender_id).await?;
        let receiving_partner_id = c
            .partner_resolver
            .resolve(&first.metadata.receiver_id)
            .await?;

        let partnership = c
            .partnership_store
            .load(&sending_partner_id, &receiving_partner_id)
            .await?;
        let configs = select_for_partnership(
            &partnership.transaction_sets,
            &sending_partner_id,
            &receiving_partner_id,
        )?;
        let grouped = group_by_guide_binding(&configs);
        let candidates = grouped.guide_ids();

        let ack = match &self.acknowledger {
            Some(acknowledger)
                if grouped
                    .without_guide_id
                    .iter()
                    .any(|config| config.scope == PartnerScope::Ack) =>
            {
                Some((acknowledger, select_ack(&grouped.without_guide_id)?))
            }
            _ => None,
        };

        for document in &documents {
            let guide = c
                .guide_resolver
                .resolve(&candidates, &document.metadata.code)
                .await?;
            let config = select_by_guide_id(&grouped.with_guide_id, &guide.guide_id)?;

            for destination in &config.destinations {
                tracing::debug!(
                    guide_id = %guide.guide_id,
                    mapping_id = destination.mapping_id.as_ref().map(|m| m.as_str()),
                    destination = %destination.destination,
                    "Processing document for destination"
                );

                let payload = c
                    .transform_engine
                    .transform(&guide.guide_id, &document.edi, destination.mapping_id.as_ref())
                    .await?;
                c.destination_sink
                    .deliver(&destination.destination, &payload)
                    .await?;
            }

            if let Some((acknowledger, ack)) = &ack {
                acknowledger
                    .acknowledge(
                        &key.bucket_name,
                        document,
                        ack,
                        &sending_partner_id,
                        &receiving_partner_id,
                    )
                    .await?;
            }
        }

        c.object_store.delete(&key.bucket_name, &key.key).await?;
        Ok(())
    }

    /// Records a failed execution, falling back to a local failure if the ledger is unavailable
    async fn fail(&self, execution_id: &ExecutionId, detail: ErrorDetail) -> ExecutionFailure {
        let recorded = AssertUnwindSafe(
            self.collaborators
                .ledger
                .record_failed(execution_id, detail.clone()),
        )
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(panic_error(panic)));

        match recorded {
            Ok(failure) => failure,
            Err(e) => {
                tracing::error!(execution_id = %execution_id, error = %e, "Failed to record failed execution");
                ExecutionFailure {
                    execution_id: execution_id.clone(),
                    error: detail,
                }
            }
        }
    }

    fn track(&self, checkpoint: &str, payload: Value) {
        self.collaborators.progress.track(checkpoint, payload);
    }
}

/// Normalizes a panic payload into an error
fn panic_error(panic: Box<dyn Any + Send>) -> EdiError {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    EdiError::Internal(format!("unknown error: {message}"))
}
