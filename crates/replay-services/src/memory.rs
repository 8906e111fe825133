//! In-memory reference backend
//!
//! Implements every collaborator contract over a record list held in
//! memory. Used by the demo CLI and as a fixture backend in tests; the
//! recorded submissions, overrides, and recompute requests are exposed for
//! inspection.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use replay_core::models::{
    DateFilter, OverridePayload, Page, RecomputeRequest, ReplayRequest, ReplaySubmission,
};

use crate::traits::{
    RecomputeService, ReplayActionService, ReplayQueryService, ReplaySubmitSink, ServiceError,
    ServiceResult,
};

#[derive(Default)]
struct StoreInner {
    records: Vec<ReplayRequest>,
    started: Vec<Uuid>,
    submissions: Vec<ReplaySubmission>,
    overrides: Vec<OverridePayload>,
    recompute_requests: Vec<RecomputeRequest>,
}

/// In-memory replay store implementing all console collaborators.
#[derive(Default)]
pub struct InMemoryReplayStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryReplayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given records.
    pub fn with_records(records: Vec<ReplayRequest>) -> Self {
        InMemoryReplayStore {
            inner: RwLock::new(StoreInner {
                records,
                ..StoreInner::default()
            }),
        }
    }

    pub async fn insert(&self, record: ReplayRequest) {
        self.inner.write().await.records.push(record);
    }

    pub async fn record_count(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Replay submissions received so far.
    pub async fn submissions(&self) -> Vec<ReplaySubmission> {
        self.inner.read().await.submissions.clone()
    }

    /// Override payloads received so far.
    pub async fn overrides(&self) -> Vec<OverridePayload> {
        self.inner.read().await.overrides.clone()
    }

    /// Recompute requests received so far.
    pub async fn recompute_requests(&self) -> Vec<RecomputeRequest> {
        self.inner.read().await.recompute_requests.clone()
    }

    /// Ids of records a start action was forwarded for.
    pub async fn started_ids(&self) -> Vec<Uuid> {
        self.inner.read().await.started.clone()
    }
}

#[async_trait]
impl ReplayQueryService for InMemoryReplayStore {
    async fn search_replay_requests(
        &self,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Page<ReplayRequest>> {
        if offset < 0 {
            return Err(ServiceError::InvalidRequest(
                "Offset must be non-negative".to_string(),
            ));
        }
        if limit <= 0 {
            return Err(ServiceError::InvalidRequest(
                "Limit must be positive".to_string(),
            ));
        }

        let inner = self.inner.read().await;
        let mut ordered: Vec<ReplayRequest> = inner.records.clone();
        // Newest first, matching how the console presents requests
        ordered.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));

        let total = ordered.len() as i64;
        let results: Vec<ReplayRequest> = ordered
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        tracing::debug!(offset, limit, total, returned = results.len(), "Served replay request page");
        Ok(Page { total, results })
    }

    async fn count_messages(&self, filter: &DateFilter) -> ServiceResult<i64> {
        let inner = self.inner.read().await;
        let count = inner
            .records
            .iter()
            .filter(|r| r.start_date >= filter.start_date && r.start_date <= filter.end_date)
            .count() as i64;
        Ok(count)
    }
}

#[async_trait]
impl RecomputeService for InMemoryReplayStore {
    async fn recompute(&self, request: RecomputeRequest) -> ServiceResult<()> {
        tracing::info!(
            start_date = %request.start_date,
            end_date = %request.end_date,
            "Recompute requested"
        );
        self.inner.write().await.recompute_requests.push(request);
        Ok(())
    }
}

#[async_trait]
impl ReplaySubmitSink for InMemoryReplayStore {
    async fn submit_replay(&self, submission: ReplaySubmission) -> ServiceResult<()> {
        tracing::info!(destination = %submission.destination, "Replay submission received");
        self.inner.write().await.submissions.push(submission);
        Ok(())
    }

    async fn apply_override(&self, payload: OverridePayload) -> ServiceResult<()> {
        tracing::info!(override_type = %payload.override_type, "Override payload received");
        self.inner.write().await.overrides.push(payload);
        Ok(())
    }
}

#[async_trait]
impl ReplayActionService for InMemoryReplayStore {
    async fn start_replay(&self, request: &ReplayRequest) -> ServiceResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.records.iter().any(|r| r.id == request.id) {
            return Err(ServiceError::NotFound(format!(
                "Replay request {}",
                request.id
            )));
        }
        inner.started.push(request.id);
        tracing::info!(id = %request.id, "Replay started");
        Ok(())
    }

    async fn delete_replay(&self, request: &ReplayRequest) -> ServiceResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != request.id);
        if inner.records.len() == before {
            return Err(ServiceError::NotFound(format!(
                "Replay request {}",
                request.id
            )));
        }
        tracing::info!(id = %request.id, "Replay request deleted");
        Ok(())
    }
}
