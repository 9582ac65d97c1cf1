//! End-to-end tests for the inbound pipeline

mod common;

use common::*;
use edi_inbound::adapters::traits::ExecutionLedger;
use edi_inbound::core::classify::{FOLDER_REASON, NOT_INBOUND_REASON};
use edi_inbound::core::execution::{generate_execution_id, ExecutionStatus};
use edi_inbound::core::pipeline::{InboundPipeline, InvocationOutcome};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_failing_key_does_not_stop_the_batch() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    harness
        .upload("acme/inbound/1.edi", &interchange("000000001", &[group("850", "1")]))
        .await;
    harness.upload("acme/inbound/2.edi", "this is not x12").await;
    harness
        .upload("acme/inbound/3.edi", &interchange("000000003", &[group("850", "3")]))
        .await;

    let event = event_for(&["acme/inbound/1.edi", "acme/inbound/2.edi", "acme/inbound/3.edi"]);
    let outcome = harness.pipeline().handle(event.clone()).await;

    let InvocationOutcome::PartiallyFailed { failure, results } = outcome else {
        panic!("expected a partial failure, got {outcome:?}");
    };
    assert_eq!(
        results.processed_keys,
        vec!["acme/inbound/1.edi", "acme/inbound/3.edi"]
    );
    assert_eq!(results.processing_errors.len(), 1);
    assert_eq!(results.processing_errors[0].key, "acme/inbound/2.edi");
    assert_eq!(results.processing_errors[0].error.kind, "split");
    assert_eq!(
        failure.error.message,
        "encountered 1 error while attempting to process 3 keys"
    );
    assert_eq!(failure.execution_id, generate_execution_id(FUNCTION_NAME, &event));

    // processed sources are deleted, the failed one stays for a retry
    assert!(!harness.store.contains(BUCKET, "acme/inbound/1.edi").await);
    assert!(harness.store.contains(BUCKET, "acme/inbound/2.edi").await);
    assert!(!harness.store.contains(BUCKET, "acme/inbound/3.edi").await);
    assert_eq!(harness.sink.delivered_to().len(), 2);

    let records = harness.ledger.list(Some(ExecutionStatus::Failed)).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].failure.as_ref().unwrap().kind, "processing");
}

#[tokio::test]
async fn test_only_filtered_keys_succeeds() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);

    let outcome = harness
        .pipeline()
        .handle(event_for(&["acme/inbound/", "acme/outbound/po.edi"]))
        .await;

    let InvocationOutcome::Succeeded(results) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert!(results.processed_keys.is_empty());
    assert_eq!(results.filtered_keys.len(), 2);
    assert_eq!(results.filtered_keys[0].reason, FOLDER_REASON);
    assert_eq!(results.filtered_keys[1].reason, NOT_INBOUND_REASON);

    let records = harness.ledger.list(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ExecutionStatus::Successful);
}

#[tokio::test]
async fn test_every_group_is_delivered_to_every_destination() {
    let harness = Harness::new(vec![po_transaction_set(vec![
        bucket_destination("orders"),
        bucket_destination("archive"),
    ])]);
    harness
        .upload(
            "acme/inbound/batch.edi",
            &interchange("000000010", &[group("850", "1"), group("850", "2")]),
        )
        .await;

    let outcome = harness
        .pipeline()
        .handle(event_for(&["acme/inbound/batch.edi"]))
        .await;

    assert!(outcome.is_success());
    assert_eq!(
        harness.sink.delivered_to(),
        vec![
            "bucket orders/orders",
            "bucket archive/orders",
            "bucket orders/orders",
            "bucket archive/orders"
        ]
    );
    let payload = &harness.sink.payloads()[0];
    assert_eq!(payload["guideId"], "guide-850");
    assert_eq!(payload["transactionSets"][0]["code"], "850");
}

#[tokio::test]
async fn test_destination_failure_stops_remaining_destinations() {
    let harness = Harness::new(vec![po_transaction_set(vec![
        bucket_destination("orders"),
        bucket_destination("reject"),
        bucket_destination("archive"),
    ])]);
    harness
        .upload("acme/inbound/po.edi", &interchange("000000001", &[group("850", "1")]))
        .await;

    let outcome = harness
        .pipeline()
        .handle(event_for(&["acme/inbound/po.edi"]))
        .await;

    let results = outcome.results().unwrap();
    assert!(results.processed_keys.is_empty());
    assert_eq!(results.processing_errors[0].error.kind, "delivery");
    assert_eq!(harness.sink.delivered_to(), vec!["bucket orders/orders"]);
    assert!(harness.store.contains(BUCKET, "acme/inbound/po.edi").await);
    assert_eq!(
        outcome.failure().unwrap().error.message,
        "encountered 1 error while attempting to process 1 key"
    );
}

#[tokio::test]
async fn test_malformed_event_fails_the_invocation() {
    let harness = Harness::new(vec![]);
    let event = json!({ "detail": "not a bucket notification" });

    let outcome = harness.pipeline().handle(event.clone()).await;

    let InvocationOutcome::Failed(failure) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(failure.error.kind, "event_parse");
    assert_eq!(failure.execution_id, generate_execution_id(FUNCTION_NAME, &event));
    assert!(harness.progress.names().contains(&"handler error".to_string()));

    let records = harness.ledger.list(Some(ExecutionStatus::Failed)).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_panic_in_collaborator_is_isolated_to_its_key() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    harness.upload("acme/inbound/boom.edi", "PANIC").await;
    harness
        .upload("acme/inbound/ok.edi", &interchange("000000001", &[group("850", "1")]))
        .await;

    let outcome = harness
        .pipeline()
        .handle(event_for(&["acme/inbound/boom.edi", "acme/inbound/ok.edi"]))
        .await;

    let results = outcome.results().unwrap();
    assert_eq!(results.processed_keys, vec!["acme/inbound/ok.edi"]);
    let error = &results.processing_errors[0].error;
    assert_eq!(error.kind, "internal");
    assert!(error.message.contains("unknown error: splitter exploded"));
}

#[tokio::test]
async fn test_unconfigured_guide_is_a_routing_error() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    harness
        .upload("acme/inbound/asn.edi", &interchange("000000001", &[group("856", "1")]))
        .await;

    let outcome = harness
        .pipeline()
        .handle(event_for(&["acme/inbound/asn.edi"]))
        .await;

    let error = &outcome.results().unwrap().processing_errors[0].error;
    assert_eq!(error.kind, "guide");
    assert!(harness.sink.delivered_to().is_empty());
}

#[tokio::test]
async fn test_acknowledgments_are_stored_per_group() {
    let harness = Harness::new(vec![
        ack_transaction_set(),
        po_transaction_set(vec![bucket_destination("orders")]),
    ]);
    harness
        .upload(
            "acme/inbound/po.edi",
            &interchange("000000042", &[group("850", "7"), group("850", "8")]),
        )
        .await;

    let outcome = harness
        .pipeline_with_acks()
        .handle(event_for(&["acme/inbound/po.edi"]))
        .await;

    assert!(outcome.is_success());
    let keys = harness.store.keys(BUCKET).await;
    assert!(keys.contains(&"outbound/acme/997-000000001.edi".to_string()));
    assert!(keys.contains(&"outbound/acme/997-000000002.edi".to_string()));
    assert!(!keys.contains(&"acme/inbound/po.edi".to_string()));
    assert_eq!(harness.counters.current("T|ISA|this-is-me|acme").await, Some(2));
}

#[tokio::test]
async fn test_acknowledger_without_ack_entry_is_idle() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    harness
        .upload("acme/inbound/po.edi", &interchange("000000001", &[group("850", "1")]))
        .await;

    let outcome = harness
        .pipeline_with_acks()
        .handle(event_for(&["acme/inbound/po.edi"]))
        .await;

    assert!(outcome.is_success());
    assert!(harness.store.keys(BUCKET).await.is_empty());
}

#[tokio::test]
async fn test_duplicate_ack_entries_fail_the_key() {
    let harness = Harness::new(vec![
        ack_transaction_set(),
        json!({ "transactionSetIdentifier": "999" }),
        po_transaction_set(vec![bucket_destination("orders")]),
    ]);
    harness
        .upload("acme/inbound/po.edi", &interchange("000000001", &[group("850", "1")]))
        .await;

    let outcome = harness
        .pipeline_with_acks()
        .handle(event_for(&["acme/inbound/po.edi"]))
        .await;

    let error = &outcome.results().unwrap().processing_errors[0].error;
    assert_eq!(error.kind, "routing");
    assert!(error
        .message
        .contains("expected exactly 1 acknowledgment transaction set configuration, found: 2"));
}

#[tokio::test]
async fn test_checkpoints_and_repeated_invocation() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    let event = event_for(&["acme/outbound/skip.edi"]);

    assert!(harness.pipeline().handle(event.clone()).await.is_success());
    assert!(harness.pipeline().handle(event).await.is_success());

    let names = harness.progress.names();
    assert_eq!(names[0], format!("starting {FUNCTION_NAME}"));
    assert!(names.contains(&"grouped event keys".to_string()));
    assert!(names.contains(&"results".to_string()));

    let records = harness.ledger.list(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].attempts, 2);
}

async fn assert_sibling_survives(harness: &Harness, failing_key: &str, kind: &str) {
    harness
        .upload("acme/inbound/ok.edi", &interchange("000000001", &[group("850", "1")]))
        .await;

    let outcome = harness
        .pipeline()
        .handle(event_for(&["acme/inbound/ok.edi", failing_key]))
        .await;

    let InvocationOutcome::PartiallyFailed { failure, results } = outcome else {
        panic!("expected a partial failure, got {outcome:?}");
    };
    assert_eq!(results.processed_keys, vec!["acme/inbound/ok.edi"]);
    assert_eq!(results.processing_errors.len(), 1);
    assert_eq!(results.processing_errors[0].key, failing_key);
    assert_eq!(results.processing_errors[0].error.kind, kind);
    assert_eq!(failure.error.kind, "processing");
    assert_eq!(harness.sink.delivered_to().len(), 1);
}

#[tokio::test]
async fn test_missing_object_fails_only_its_key() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);

    assert_sibling_survives(&harness, "acme/inbound/missing.edi", "storage").await;
}

#[tokio::test]
async fn test_missing_partnership_fails_only_its_key() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    // this-is-me -> acme has no partnership file
    harness
        .upload(
            "acme/inbound/reverse.edi",
            &interchange_between("THISISME", "ACME", "000000002", &[group("850", "2")]),
        )
        .await;

    assert_sibling_survives(&harness, "acme/inbound/reverse.edi", "partnership").await;
    assert!(harness.store.contains(BUCKET, "acme/inbound/reverse.edi").await);
}

#[tokio::test]
async fn test_unmatched_partnership_entries_fail_only_their_key() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    harness.add_partnership(
        "this-is-me",
        "acme",
        vec![json!({
            "sendingPartnerId": "globex",
            "receivingPartnerId": "initech",
            "transactionSetIdentifier": "850",
            "guideId": "guide-850",
            "destinations": [bucket_destination("orders")]
        })],
    );
    harness
        .upload(
            "acme/inbound/reverse.edi",
            &interchange_between("THISISME", "ACME", "000000002", &[group("850", "2")]),
        )
        .await;

    assert_sibling_survives(&harness, "acme/inbound/reverse.edi", "routing").await;

    let records = harness.ledger.list(Some(ExecutionStatus::Failed)).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_failed_ledger_transition_keeps_partial_results() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    harness
        .upload("acme/inbound/1.edi", &interchange("000000001", &[group("850", "1")]))
        .await;
    harness.upload("acme/inbound/2.edi", "this is not x12").await;

    let mut collaborators = harness.collaborators();
    collaborators.ledger = Arc::new(BrokenTransitionLedger(harness.ledger.clone()));
    let pipeline = InboundPipeline::new(FUNCTION_NAME, collaborators);

    let event = event_for(&["acme/inbound/1.edi", "acme/inbound/2.edi"]);
    let outcome = pipeline.handle(event.clone()).await;

    let InvocationOutcome::PartiallyFailed { failure, results } = outcome else {
        panic!("expected a partial failure, got {outcome:?}");
    };
    assert_eq!(failure.execution_id, generate_execution_id(FUNCTION_NAME, &event));
    assert_eq!(failure.error.kind, "processing");
    assert_eq!(
        failure.error.message,
        "encountered 1 error while attempting to process 2 keys"
    );
    assert_eq!(results.processed_keys, vec!["acme/inbound/1.edi"]);
    assert_eq!(results.processing_errors[0].error.kind, "split");
    assert!(!harness.store.contains(BUCKET, "acme/inbound/1.edi").await);

    let records = harness.ledger.list(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ExecutionStatus::New);
}

#[tokio::test]
async fn test_failed_success_transition_still_succeeds() {
    let harness = Harness::new(vec![po_transaction_set(vec![bucket_destination("orders")])]);
    harness
        .upload("acme/inbound/1.edi", &interchange("000000001", &[group("850", "1")]))
        .await;

    let mut collaborators = harness.collaborators();
    collaborators.ledger = Arc::new(BrokenTransitionLedger(harness.ledger.clone()));
    let outcome = InboundPipeline::new(FUNCTION_NAME, collaborators)
        .handle(event_for(&["acme/inbound/1.edi"]))
        .await;

    let InvocationOutcome::Succeeded(results) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(results.processed_keys, vec!["acme/inbound/1.edi"]);
    assert_eq!(harness.sink.delivered_to().len(), 1);
}
