//! Console flow integration tests over the in-memory backend.
//!
//! Wires the three view-models to `InMemoryReplayStore` and drives the flows
//! end to end: paging, row actions, the recompute handshake, and override
//! submission.

mod helpers;

use std::sync::Arc;

use chrono::Duration;
use helpers::sample_records;
use replay_console::{FilterState, OverrideForm, ReplayFilterForm, ReplayResultsTable};
use replay_core::models::DateFilter;
use replay_core::ConsoleConfig;
use replay_services::{InMemoryReplayStore, ReplayQueryService};

#[tokio::test]
async fn test_table_pages_through_store() {
    let store = Arc::new(InMemoryReplayStore::with_records(sample_records(45)));
    let table = ReplayResultsTable::new(store.clone(), store.clone());

    assert!(table.load_page().await.unwrap());
    assert_eq!(table.total_results(), 45);
    assert_eq!(table.records().len(), 10);

    assert!(table.on_page_change(2, 10).await.unwrap());
    let records = table.records();
    assert_eq!(records.len(), 10);
    assert_eq!(records[0].requester_uid, "usr_020");
}

#[tokio::test]
async fn test_deleted_row_stays_until_reload() {
    let store = Arc::new(InMemoryReplayStore::with_records(sample_records(5)));
    let table = ReplayResultsTable::new(store.clone(), store.clone());

    table.load_page().await.unwrap();
    let victim = table.records()[0].clone();

    table.delete_action(&victim).await.unwrap();
    // No optimistic removal: the row is still displayed
    assert!(table.records().iter().any(|r| r.id == victim.id));

    table.load_page().await.unwrap();
    assert!(!table.records().iter().any(|r| r.id == victim.id));
    assert_eq!(table.total_results(), 4);
}

#[tokio::test]
async fn test_start_action_reaches_store() {
    let store = Arc::new(InMemoryReplayStore::with_records(sample_records(3)));
    let table = ReplayResultsTable::new(store.clone(), store.clone());

    table.load_page().await.unwrap();
    let target = table.records()[1].clone();
    table.start_action(&target).await.unwrap();

    assert_eq!(store.started_ids().await, vec![target.id]);
}

#[tokio::test]
async fn test_recompute_handshake_and_submission() {
    let records = sample_records(20);
    let baseline = DateFilter::new(
        records[19].start_date,
        records[0].start_date,
    );
    let store = Arc::new(InMemoryReplayStore::with_records(records));
    let config = ConsoleConfig::default();

    let initial_count = store.count_messages(&baseline).await.unwrap();
    let mut form = ReplayFilterForm::new(
        baseline,
        initial_count,
        config.destination_options.clone(),
        store.clone(),
        store.clone(),
    );
    form.set_destination("Staging Environment").unwrap();

    // Narrow the range: the form goes dirty and blocks submission
    let narrowed_start = baseline.start_date + Duration::hours(10);
    form.set_start_date(narrowed_start);
    assert!(form.is_submit_disabled());
    assert_eq!(form.submit().await, None);

    // Recompute, then feed the refreshed count back as the collaborator would
    let request = form.recompute().await.expect("form was dirty");
    assert_eq!(store.recompute_requests().await, vec![request]);
    assert_eq!(form.state(), FilterState::Recomputing);

    let refreshed = store
        .count_messages(&DateFilter::new(form.start_date(), form.end_date()))
        .await
        .unwrap();
    form.update_message_count(refreshed);
    assert_eq!(form.state(), FilterState::Clean);
    assert_eq!(form.message_count(), refreshed);

    let submission = form.submit().await.expect("form is clean");
    assert_eq!(submission.start_date, narrowed_start);
    assert_eq!(store.submissions().await, vec![submission]);
}

#[tokio::test]
async fn test_override_submission_reaches_store() {
    let store = Arc::new(InMemoryReplayStore::new());
    let config = ConsoleConfig::default();
    let mut form = OverrideForm::new(config.app_info(), store.clone());

    form.toggle_entitlements();
    form.set_entitlements_value("billing, reporting");
    let payload = form.submit().await.expect("override is active");

    let received = store.overrides().await;
    assert_eq!(received, vec![payload]);
    assert_eq!(
        received[0].custom_entitlements,
        Some(vec!["billing".to_string(), "reporting".to_string()])
    );
}
