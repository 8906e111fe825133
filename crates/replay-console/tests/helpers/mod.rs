//! Test helpers: sample records and scripted collaborators.
//!
//! Run from workspace root: `cargo test -p replay-console` or
//! `cargo test -p replay-console --test console_flow_test`.

// Shared across test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use replay_core::models::{DateFilter, Page, ReplayRequest};
use replay_services::{ReplayActionService, ReplayQueryService, ServiceResult};
use tokio::sync::Notify;
use uuid::Uuid;

/// Deterministic sample records, newest first by creation date.
pub fn sample_records(count: usize) -> Vec<ReplayRequest> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| ReplayRequest {
            id: Uuid::new_v4(),
            requester_uid: format!("usr_{:03}", i),
            starter_uid: "usr_operator".to_string(),
            creation_date: base - Duration::hours(i as i64),
            start_date: base - Duration::hours(i as i64),
            flow_type: "standard".to_string(),
            destination: "Test Environment".to_string(),
        })
        .collect()
}

/// Query collaborator whose first call stalls until released.
///
/// Used to overlap two in-flight page loads: the test releases the first
/// response only after a newer request has already been applied.
pub struct StallFirstQuery {
    records: Vec<ReplayRequest>,
    calls: AtomicUsize,
    /// Signaled when the first call has been issued.
    pub first_issued: Notify,
    /// Release the stalled first call.
    pub release_first: Notify,
}

impl StallFirstQuery {
    pub fn new(records: Vec<ReplayRequest>) -> Self {
        StallFirstQuery {
            records,
            calls: AtomicUsize::new(0),
            first_issued: Notify::new(),
            release_first: Notify::new(),
        }
    }

    fn page(&self, offset: i64, limit: i64) -> Page<ReplayRequest> {
        let results = self
            .records
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Page {
            total: self.records.len() as i64,
            results,
        }
    }
}

#[async_trait]
impl ReplayQueryService for StallFirstQuery {
    async fn search_replay_requests(
        &self,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Page<ReplayRequest>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.first_issued.notify_one();
            self.release_first.notified().await;
        }
        Ok(self.page(offset, limit))
    }

    async fn count_messages(&self, _filter: &DateFilter) -> ServiceResult<i64> {
        Ok(self.records.len() as i64)
    }
}

/// Row-action collaborator that accepts everything.
pub struct NoopActions;

#[async_trait]
impl ReplayActionService for NoopActions {
    async fn start_replay(&self, _request: &ReplayRequest) -> ServiceResult<()> {
        Ok(())
    }

    async fn delete_replay(&self, _request: &ReplayRequest) -> ServiceResult<()> {
        Ok(())
    }
}
