//! Collaborator factory
//!
//! Builds the local collaborators and the pipeline from configuration.

use crate::adapters::counter::FileCounterStore;
use crate::adapters::delivery::DeliveryRouter;
use crate::adapters::guides::CatalogGuideResolver;
use crate::adapters::ledger::FileExecutionLedger;
use crate::adapters::partnership::{ConfigPartnerResolver, FilePartnershipStore};
use crate::adapters::storage::LocalObjectStore;
use crate::adapters::traits::{ExecutionLedger, ObjectStore};
use crate::adapters::x12::{X12Splitter, X12Translator};
use crate::config::EdiConfig;
use crate::core::ack::FunctionalAcknowledger;
use crate::core::control_number::KeyedCounterService;
use crate::core::pipeline::{InboundPipeline, PipelineCollaborators};
use crate::domain::{EdiError, Result};
use crate::logging::TracingProgressTracker;
use std::sync::Arc;

/// Create the object store rooted at `storage.root_path`
pub fn create_object_store(config: &EdiConfig) -> Arc<dyn ObjectStore + Send + Sync> {
    Arc::new(LocalObjectStore::new(&config.storage.root_path))
}

/// Create the execution ledger
pub fn create_ledger(config: &EdiConfig) -> Arc<dyn ExecutionLedger + Send + Sync> {
    Arc::new(FileExecutionLedger::new(
        &config.ledger.path,
        config.ledger.loop_detection_threshold,
    ))
}

/// Create the control number service backed by `control_numbers.path`
pub fn create_counter_service(config: &EdiConfig) -> KeyedCounterService {
    KeyedCounterService::new(Arc::new(FileCounterStore::new(
        &config.control_numbers.path,
    )))
}

/// Build the pipeline and every collaborator it needs
///
/// # Errors
///
/// Returns [`EdiError::Configuration`] if the partner table or guide catalog
/// holds unusable ids, or if the HTTP client cannot be built.
pub fn build_pipeline(config: &EdiConfig) -> Result<InboundPipeline> {
    let object_store = create_object_store(config);

    let partners = config
        .partner_entries()
        .map_err(|e| EdiError::Configuration(format!("invalid partner id: {e}")))?;
    let guides = config
        .guide_catalog()
        .map_err(|e| EdiError::Configuration(format!("invalid guide id: {e}")))?;

    let destination_sink = DeliveryRouter::new(
        object_store.clone(),
        config.delivery.timeout_seconds,
        config.delivery.webhook_api_key.clone(),
    )?;

    let collaborators = PipelineCollaborators {
        object_store: object_store.clone(),
        partnership_store: Arc::new(FilePartnershipStore::new(&config.partnerships.path)),
        partner_resolver: Arc::new(ConfigPartnerResolver::new(partners)),
        splitter: Arc::new(X12Splitter::new()),
        guide_resolver: Arc::new(CatalogGuideResolver::new(guides)),
        transform_engine: Arc::new(X12Translator::new()),
        destination_sink: Arc::new(destination_sink),
        ledger: create_ledger(config),
        progress: Arc::new(TracingProgressTracker),
    };

    let pipeline = InboundPipeline::new(&config.application.function_name, collaborators);

    if config.acknowledgments.enabled {
        tracing::info!(
            outbound_prefix = %config.acknowledgments.outbound_prefix,
            "Functional acknowledgments enabled"
        );
        let acknowledger = FunctionalAcknowledger::new(
            create_counter_service(config),
            object_store,
            &config.acknowledgments.outbound_prefix,
        );
        return Ok(pipeline.with_acknowledger(acknowledger));
    }

    Ok(pipeline)
}
