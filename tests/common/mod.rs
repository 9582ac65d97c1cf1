//! Shared helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use edi_inbound::adapters::counter::InMemoryCounterStore;
use edi_inbound::adapters::guides::CatalogGuideResolver;
use edi_inbound::adapters::ledger::FileExecutionLedger;
use edi_inbound::adapters::partnership::{ConfigPartnerResolver, FilePartnershipStore};
use edi_inbound::adapters::storage::InMemoryObjectStore;
use edi_inbound::adapters::traits::{
    DestinationSink, DocumentSplitter, ExecutionLedger, ObjectStore, ProgressTracker,
};
use edi_inbound::adapters::x12::{X12Splitter, X12Translator};
use edi_inbound::core::ack::FunctionalAcknowledger;
use edi_inbound::core::control_number::KeyedCounterService;
use edi_inbound::core::execution::{ExecutionFailure, ExecutionRecord, ExecutionStatus};
use edi_inbound::core::pipeline::{InboundPipeline, PipelineCollaborators};
use edi_inbound::domain::{
    DeliveryError, DestinationTarget, EdiDocument, ErrorDetail, ExecutionId, GuideId,
    GuideSummary, LedgerError, NotificationEvent, NotificationRecord, PartnerId, Result,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BUCKET: &str = "edi-bucket";
pub const FUNCTION_NAME: &str = "edi-inbound-test";

/// Fixed-width ISA segment
pub fn isa(sender: &str, receiver: &str, control_number: &str) -> String {
    format!(
        "ISA*00*          *00*          *ZZ*{sender:<15}*ZZ*{receiver:<15}*250101*1200*U*00401*{control_number}*0*T*>~"
    )
}

/// A functional group holding one purchase order
pub fn group(code: &str, group_control: &str) -> String {
    format!(
        "GS*PO*SENDER*RECEIVER*20250101*1200*{group_control}*X*004010~\nST*{code}*0001~\nBEG*00*SA*PO-{group_control}**20250101~\nSE*3*0001~\nGE*1*{group_control}~"
    )
}

/// An interchange from ACME to THISISME
pub fn interchange(control_number: &str, groups: &[String]) -> String {
    interchange_between("ACME", "THISISME", control_number, groups)
}

pub fn interchange_between(
    sender: &str,
    receiver: &str,
    control_number: &str,
    groups: &[String],
) -> String {
    let mut edi = isa(sender, receiver, control_number);
    edi.push('\n');
    for group in groups {
        edi.push_str(group);
        edi.push('\n');
    }
    edi.push_str(&format!("IEA*{}*{control_number}~", groups.len()));
    edi
}

/// Notification event for created objects in [`BUCKET`]
pub fn event_for(keys: &[&str]) -> Value {
    let event = NotificationEvent {
        records: keys
            .iter()
            .map(|key| NotificationRecord::created(BUCKET, *key))
            .collect(),
    };
    serde_json::to_value(event).unwrap()
}

pub fn bucket_destination(bucket_name: &str) -> Value {
    json!({
        "destination": { "type": "bucket", "bucketName": bucket_name, "path": "orders" }
    })
}

/// Routing entry for 850s from acme to this-is-me
pub fn po_transaction_set(destinations: Vec<Value>) -> Value {
    json!({
        "sendingPartnerId": "acme",
        "receivingPartnerId": "this-is-me",
        "transactionSetIdentifier": "850",
        "usageIndicatorCode": "T",
        "guideId": "guide-850",
        "destinations": destinations
    })
}

pub fn ack_transaction_set() -> Value {
    json!({ "transactionSetIdentifier": "997" })
}

/// Sink recording every delivery, rejecting buckets named `reject`
#[derive(Default)]
pub struct RecordingSink {
    pub deliveries: Mutex<Vec<(String, Value)>>,
}

impl RecordingSink {
    pub fn delivered_to(&self) -> Vec<String> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|(target, _)| target.clone())
            .collect()
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

#[async_trait]
impl DestinationSink for RecordingSink {
    async fn deliver(&self, destination: &DestinationTarget, payload: &Value) -> Result<()> {
        if let DestinationTarget::Bucket { bucket_name, .. } = destination {
            if bucket_name == "reject" {
                return Err(DeliveryError::Rejected {
                    destination: destination.to_string(),
                    status: 503,
                }
                .into());
            }
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((destination.to_string(), payload.clone()));
        Ok(())
    }
}

/// Progress tracker remembering checkpoint names
#[derive(Default)]
pub struct RecordingProgress {
    pub checkpoints: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn names(&self) -> Vec<String> {
        self.checkpoints.lock().unwrap().clone()
    }
}

impl ProgressTracker for RecordingProgress {
    fn track(&self, checkpoint: &str, _payload: Value) {
        self.checkpoints.lock().unwrap().push(checkpoint.to_string());
    }
}

/// X12 splitter that panics on content containing `PANIC`
pub struct PanickingSplitter(pub X12Splitter);

impl DocumentSplitter for PanickingSplitter {
    fn split(&self, content: &str) -> Result<Vec<EdiDocument>> {
        if content.contains("PANIC") {
            panic!("splitter exploded");
        }
        self.0.split(content)
    }
}

/// Ledger that starts executions but fails every final transition
pub struct BrokenTransitionLedger(pub Arc<FileExecutionLedger>);

impl BrokenTransitionLedger {
    fn write_failed(execution_id: &ExecutionId) -> LedgerError {
        LedgerError::WriteFailed {
            execution_id: execution_id.to_string(),
            message: "disk full".to_string(),
        }
    }
}

#[async_trait]
impl ExecutionLedger for BrokenTransitionLedger {
    async fn record_new(&self, execution_id: &ExecutionId, input: &Value) -> Result<()> {
        self.0.record_new(execution_id, input).await
    }

    async fn mark_successful(&self, execution_id: &ExecutionId) -> Result<()> {
        Err(Self::write_failed(execution_id).into())
    }

    async fn record_failed(
        &self,
        execution_id: &ExecutionId,
        _error: ErrorDetail,
    ) -> Result<ExecutionFailure> {
        Err(Self::write_failed(execution_id).into())
    }

    async fn list(&self, status: Option<ExecutionStatus>) -> Result<Vec<ExecutionRecord>> {
        self.0.list(status).await
    }
}

/// Pipeline wired to in-memory and temp-dir collaborators
pub struct Harness {
    pub dir: TempDir,
    pub store: Arc<InMemoryObjectStore>,
    pub sink: Arc<RecordingSink>,
    pub progress: Arc<RecordingProgress>,
    pub ledger: Arc<FileExecutionLedger>,
    pub counters: Arc<InMemoryCounterStore>,
}

impl Harness {
    pub fn new(transaction_sets: Vec<Value>) -> Self {
        let dir = TempDir::new().unwrap();
        let partnerships = dir.path().join("partnerships");
        std::fs::create_dir_all(&partnerships).unwrap();
        std::fs::write(
            partnerships.join("acme_this-is-me.json"),
            serde_json::to_vec(&json!({
                "sendingPartnerId": "acme",
                "receivingPartnerId": "this-is-me",
                "transactionSets": transaction_sets
            }))
            .unwrap(),
        )
        .unwrap();

        let ledger = Arc::new(FileExecutionLedger::new(dir.path().join("ledger"), 5));

        Self {
            dir,
            store: Arc::new(InMemoryObjectStore::new()),
            sink: Arc::new(RecordingSink::default()),
            progress: Arc::new(RecordingProgress::default()),
            ledger,
            counters: Arc::new(InMemoryCounterStore::new()),
        }
    }

    pub fn collaborators(&self) -> PipelineCollaborators {
        PipelineCollaborators {
            object_store: self.store.clone(),
            partnership_store: Arc::new(FilePartnershipStore::new(
                self.dir.path().join("partnerships"),
            )),
            partner_resolver: Arc::new(ConfigPartnerResolver::new([
                ("ACME".to_string(), PartnerId::new("acme").unwrap()),
                ("THISISME".to_string(), PartnerId::new("this-is-me").unwrap()),
            ])),
            splitter: Arc::new(PanickingSplitter(X12Splitter::new())),
            guide_resolver: Arc::new(CatalogGuideResolver::new(vec![GuideSummary {
                guide_id: GuideId::new("guide-850").unwrap(),
                transaction_set: "850".to_string(),
                name: None,
            }])),
            transform_engine: Arc::new(X12Translator::new()),
            destination_sink: self.sink.clone(),
            ledger: self.ledger.clone(),
            progress: self.progress.clone(),
        }
    }

    /// Writes another partnership file next to the default one
    pub fn add_partnership(&self, sending: &str, receiving: &str, transaction_sets: Vec<Value>) {
        std::fs::write(
            self.dir
                .path()
                .join("partnerships")
                .join(format!("{sending}_{receiving}.json")),
            serde_json::to_vec(&json!({
                "sendingPartnerId": sending,
                "receivingPartnerId": receiving,
                "transactionSets": transaction_sets
            }))
            .unwrap(),
        )
        .unwrap();
    }

    pub fn pipeline(&self) -> InboundPipeline {
        InboundPipeline::new(FUNCTION_NAME, self.collaborators())
    }

    pub fn pipeline_with_acks(&self) -> InboundPipeline {
        self.pipeline().with_acknowledger(FunctionalAcknowledger::new(
            KeyedCounterService::new(self.counters.clone()),
            self.store.clone(),
            "outbound",
        ))
    }

    pub async fn upload(&self, key: &str, content: &str) {
        self.store
            .put(BUCKET, key, content.as_bytes().to_vec())
            .await
            .unwrap();
    }
}
