//! Collaborator contracts
//!
//! This module defines the traits the console view-models depend on. Any
//! compliant backend (HTTP client, message bus, in-memory store) can stand
//! behind them; the view-models never assume a concrete implementation.

use async_trait::async_trait;
use replay_core::models::{
    DateFilter, OverridePayload, Page, RecomputeRequest, ReplayRequest, ReplaySubmission,
};
use thiserror::Error;

/// Collaborator operation errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Recompute failed: {0}")]
    RecomputeFailed(String),

    #[error("Submit failed: {0}")]
    SubmitFailed(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for collaborator operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Paged query collaborator consumed by the results table.
#[async_trait]
pub trait ReplayQueryService: Send + Sync {
    /// Fetch the replay requests in `[offset, offset + limit)` along with
    /// the full result-set size.
    async fn search_replay_requests(
        &self,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Page<ReplayRequest>>;

    /// Count the messages covered by a date range.
    async fn count_messages(&self, filter: &DateFilter) -> ServiceResult<i64>;
}

/// Recompute collaborator notified when the filter form's date range drifts.
///
/// Fire-and-forget from the form's perspective: the collaborator is expected
/// to eventually push a refreshed count back through
/// `ReplayFilterForm::update_message_count`.
#[async_trait]
pub trait RecomputeService: Send + Sync {
    async fn recompute(&self, request: RecomputeRequest) -> ServiceResult<()>;
}

/// Submit collaborator receiving finalized form payloads.
#[async_trait]
pub trait ReplaySubmitSink: Send + Sync {
    async fn submit_replay(&self, submission: ReplaySubmission) -> ServiceResult<()>;

    async fn apply_override(&self, payload: OverridePayload) -> ServiceResult<()>;
}

/// Row-action collaborator for the results table.
#[async_trait]
pub trait ReplayActionService: Send + Sync {
    async fn start_replay(&self, request: &ReplayRequest) -> ServiceResult<()>;

    async fn delete_replay(&self, request: &ReplayRequest) -> ServiceResult<()>;
}
