use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date range a replay view was computed against.
///
/// Externally supplied baseline; the filter form measures drift against it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl DateFilter {
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        DateFilter {
            start_date,
            end_date,
        }
    }

    /// Whether the given range differs from this baseline on either bound.
    pub fn drifted_from(&self, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> bool {
        start_date != self.start_date || end_date != self.end_date
    }
}

/// A replay request record, as returned by the query collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRequest {
    pub id: Uuid,
    pub requester_uid: String,
    pub starter_uid: String,
    pub creation_date: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub flow_type: String,
    pub destination: String,
}

/// Finalized replay submission emitted by the filter form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySubmission {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub destination: String,
}

/// Recompute request emitted when the date range drifts from the baseline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<DateFilter> for RecomputeRequest {
    fn from(filter: DateFilter) -> Self {
        RecomputeRequest {
            start_date: filter.start_date,
            end_date: filter.end_date,
        }
    }
}
