//! Paged replay-request table
//!
//! Holds one page of replay-request records fetched from the query
//! collaborator, plus the page parameters and total result count. Each
//! outbound query is stamped with a generation; a response is applied only
//! if it is still the latest issued request, so a slow response can never
//! overwrite the page the user has since navigated to.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use replay_core::models::{PageRequest, ReplayRequest};
use replay_services::{ReplayActionService, ReplayQueryService, ServiceError, ServiceResult};

struct TableState {
    page: PageRequest,
    records: Vec<ReplayRequest>,
    total_results: i64,
    last_error: Option<String>,
    generation: u64,
}

pub struct ReplayResultsTable {
    query: Arc<dyn ReplayQueryService>,
    actions: Arc<dyn ReplayActionService>,
    state: Mutex<TableState>,
}

impl ReplayResultsTable {
    pub fn new(query: Arc<dyn ReplayQueryService>, actions: Arc<dyn ReplayActionService>) -> Self {
        Self::with_page(query, actions, PageRequest::default())
    }

    /// Create a table starting at the given page parameters.
    pub fn with_page(
        query: Arc<dyn ReplayQueryService>,
        actions: Arc<dyn ReplayActionService>,
        page: PageRequest,
    ) -> Self {
        ReplayResultsTable {
            query,
            actions,
            state: Mutex::new(TableState {
                page,
                records: Vec::new(),
                total_results: 0,
                last_error: None,
                generation: 0,
            }),
        }
    }

    /// Currently displayed records (one page's worth).
    pub fn records(&self) -> Vec<ReplayRequest> {
        self.lock().records.clone()
    }

    pub fn total_results(&self) -> i64 {
        self.lock().total_results
    }

    pub fn page(&self) -> PageRequest {
        self.lock().page
    }

    /// Error from the most recent applied query, if it failed.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Load the current page from the query collaborator.
    ///
    /// Returns `Ok(true)` when the response was applied, `Ok(false)` when it
    /// arrived after a newer request had been issued and was discarded. A
    /// fresh failure clears the display into an explicit error state and is
    /// returned to the caller.
    pub async fn load_page(&self) -> ServiceResult<bool> {
        let (generation, offset, limit) = {
            let mut state = self.lock();
            if let Err(msg) = state.page.validate() {
                return Err(ServiceError::InvalidRequest(msg));
            }
            state.generation += 1;
            (state.generation, state.page.offset(), state.page.page_size)
        };

        tracing::debug!(offset, limit, generation, "Loading replay request page");
        let response = self.query.search_replay_requests(offset, limit).await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(
                generation,
                latest = state.generation,
                "Discarding superseded page response"
            );
            return Ok(false);
        }

        match response {
            Ok(page) => {
                state.records = page.results;
                state.total_results = page.total;
                state.last_error = None;
                Ok(true)
            }
            Err(err) => {
                state.records.clear();
                state.total_results = 0;
                state.last_error = Some(err.to_string());
                tracing::warn!(error = %err, "Replay request query failed");
                Err(err)
            }
        }
    }

    /// Apply new page parameters and reload.
    pub async fn on_page_change(&self, page_index: i64, page_size: i64) -> ServiceResult<bool> {
        {
            let request = PageRequest::new(page_index, page_size);
            if let Err(msg) = request.validate() {
                return Err(ServiceError::InvalidRequest(msg));
            }
            self.lock().page = request;
        }
        self.load_page().await
    }

    /// Forward a start action for the given record.
    pub async fn start_action(&self, record: &ReplayRequest) -> ServiceResult<()> {
        tracing::info!(id = %record.id, requester_uid = %record.requester_uid, "Start action");
        self.actions.start_replay(record).await
    }

    /// Forward a delete action for the given record.
    ///
    /// The held record set is not touched: the row disappears on the next
    /// [`Self::load_page`], not before.
    pub async fn delete_action(&self, record: &ReplayRequest) -> ServiceResult<()> {
        tracing::info!(id = %record.id, requester_uid = %record.requester_uid, "Delete action");
        self.actions.delete_replay(record).await
    }

    // The lock is only ever held between awaits; a poisoned lock still
    // carries consistent display state, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use replay_core::models::Page;
    use uuid::Uuid;

    struct ScriptedQuery {
        records: Vec<ReplayRequest>,
        fail: bool,
    }

    #[async_trait]
    impl ReplayQueryService for ScriptedQuery {
        async fn search_replay_requests(
            &self,
            offset: i64,
            limit: i64,
        ) -> ServiceResult<Page<ReplayRequest>> {
            if self.fail {
                return Err(ServiceError::QueryFailed("backend unavailable".to_string()));
            }
            let results = self
                .records
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();
            Ok(Page {
                total: self.records.len() as i64,
                results,
            })
        }

        async fn count_messages(
            &self,
            _filter: &replay_core::models::DateFilter,
        ) -> ServiceResult<i64> {
            Ok(self.records.len() as i64)
        }
    }

    struct NoopActions;

    #[async_trait]
    impl ReplayActionService for NoopActions {
        async fn start_replay(&self, _request: &ReplayRequest) -> ServiceResult<()> {
            Ok(())
        }

        async fn delete_replay(&self, _request: &ReplayRequest) -> ServiceResult<()> {
            Ok(())
        }
    }

    fn sample_records(count: usize) -> Vec<ReplayRequest> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        (0..count)
            .map(|i| ReplayRequest {
                id: Uuid::new_v4(),
                requester_uid: format!("usr_{:03}", i),
                starter_uid: "usr_operator".to_string(),
                creation_date: base - Duration::hours(i as i64),
                start_date: base,
                flow_type: "standard".to_string(),
                destination: "Test Environment".to_string(),
            })
            .collect()
    }

    fn table(records: Vec<ReplayRequest>) -> ReplayResultsTable {
        ReplayResultsTable::new(
            Arc::new(ScriptedQuery {
                records,
                fail: false,
            }),
            Arc::new(NoopActions),
        )
    }

    #[tokio::test]
    async fn test_load_page_requests_offset_and_replaces_state() {
        let table = ReplayResultsTable::with_page(
            Arc::new(ScriptedQuery {
                records: sample_records(45),
                fail: false,
            }),
            Arc::new(NoopActions),
            PageRequest::new(2, 10),
        );

        assert!(table.load_page().await.unwrap());
        assert_eq!(table.total_results(), 45);
        let records = table.records();
        assert_eq!(records.len(), 10);
        // Offset 20: the page starts at the 21st record
        assert_eq!(records[0].requester_uid, "usr_020");
    }

    #[tokio::test]
    async fn test_page_change_replaces_display() {
        let table = table(sample_records(30));
        table.load_page().await.unwrap();
        assert_eq!(table.records().len(), 10);

        assert!(table.on_page_change(0, 25).await.unwrap());
        let records = table.records();
        assert_eq!(records.len(), 25);
        assert_eq!(table.page(), PageRequest::new(0, 25));
        // No stale merge: the display is exactly the newly loaded page
        assert_eq!(records[0].requester_uid, "usr_000");
        assert_eq!(records[24].requester_uid, "usr_024");
    }

    #[tokio::test]
    async fn test_page_change_rejects_unknown_page_size() {
        let table = table(sample_records(5));
        let err = table.on_page_change(0, 7).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_query_failure_yields_error_state() {
        let table = ReplayResultsTable::new(
            Arc::new(ScriptedQuery {
                records: Vec::new(),
                fail: true,
            }),
            Arc::new(NoopActions),
        );

        assert!(table.load_page().await.is_err());
        assert!(table.records().is_empty());
        assert_eq!(table.total_results(), 0);
        assert!(table.last_error().is_some());
    }

    #[tokio::test]
    async fn test_error_state_cleared_on_next_success() {
        let records = sample_records(3);
        let failing = ReplayResultsTable::new(
            Arc::new(ScriptedQuery {
                records: Vec::new(),
                fail: true,
            }),
            Arc::new(NoopActions),
        );
        let _ = failing.load_page().await;
        assert!(failing.last_error().is_some());

        let table = table(records);
        table.load_page().await.unwrap();
        assert!(table.last_error().is_none());
    }
}
