//! Replay filter form
//!
//! Date-range + destination form over an externally supplied baseline
//! filter. Drift from the baseline must be recomputed before submission, so
//! the form runs a three-state machine:
//!
//! ```text
//! Clean --date drift--> Dirty --recompute()--> Recomputing
//!   ^                     ^                        |
//!   |                     +----date edit-----------+
//!   +--------update_message_count (confirms)-------+
//! ```
//!
//! Submission is permitted only in `Clean`, which closes the window where
//! stale-date results could be submitted while a recompute is in flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use replay_core::models::{DateFilter, RecomputeRequest, ReplaySubmission};
use replay_core::AppError;
use replay_services::{RecomputeService, ReplaySubmitSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// Displayed results match the current date range; submission allowed.
    Clean,
    /// The date range drifted from the baseline; a recompute is required.
    Dirty,
    /// A recompute was emitted and its confirmation is still pending.
    Recomputing,
}

pub struct ReplayFilterForm {
    baseline: DateFilter,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    destination: Option<String>,
    destination_options: Vec<String>,
    message_count: i64,
    state: FilterState,
    /// Range the in-flight recompute was issued for.
    pending: Option<DateFilter>,
    recompute_service: Arc<dyn RecomputeService>,
    sink: Arc<dyn ReplaySubmitSink>,
}

impl ReplayFilterForm {
    /// Seed the form from the externally supplied baseline filter and
    /// initial record count.
    pub fn new(
        baseline: DateFilter,
        initial_message_count: i64,
        destination_options: Vec<String>,
        recompute_service: Arc<dyn RecomputeService>,
        sink: Arc<dyn ReplaySubmitSink>,
    ) -> Self {
        ReplayFilterForm {
            baseline,
            start_date: baseline.start_date,
            end_date: baseline.end_date,
            destination: None,
            destination_options,
            message_count: initial_message_count,
            state: FilterState::Clean,
            pending: None,
            recompute_service,
            sink,
        }
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    pub fn baseline(&self) -> DateFilter {
        self.baseline
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn destination_options(&self) -> &[String] {
        &self.destination_options
    }

    pub fn message_count(&self) -> i64 {
        self.message_count
    }

    /// Whether the date range has drifted from the baseline and no recompute
    /// has been issued for it yet.
    pub fn has_date_changed(&self) -> bool {
        self.state == FilterState::Dirty
    }

    /// The recompute affordance is shown exactly while the form is dirty.
    pub fn show_recompute(&self) -> bool {
        self.state == FilterState::Dirty
    }

    /// Submission is unavailable while required fields are missing or the
    /// displayed results do not match the current date range.
    pub fn is_submit_disabled(&self) -> bool {
        self.state != FilterState::Clean || self.destination.is_none()
    }

    pub fn set_start_date(&mut self, start_date: DateTime<Utc>) {
        self.start_date = start_date;
        self.refresh_state();
    }

    pub fn set_end_date(&mut self, end_date: DateTime<Utc>) {
        self.end_date = end_date;
        self.refresh_state();
    }

    /// Select a destination from the catalogue.
    pub fn set_destination(&mut self, destination: impl Into<String>) -> Result<(), AppError> {
        let destination = destination.into();
        if !self.destination_options.contains(&destination) {
            return Err(AppError::InvalidInput(format!(
                "Unknown destination: {}",
                destination
            )));
        }
        self.destination = Some(destination);
        Ok(())
    }

    /// Emit a recompute for the current date range.
    ///
    /// No-op unless the form is dirty. On success the form waits in
    /// `Recomputing` until the collaborator pushes a refreshed count back;
    /// the baseline is left untouched. A collaborator failure keeps the form
    /// dirty.
    pub async fn recompute(&mut self) -> Option<RecomputeRequest> {
        if self.state != FilterState::Dirty {
            return None;
        }

        let range = DateFilter::new(self.start_date, self.end_date);
        let request = RecomputeRequest::from(range);
        match self.recompute_service.recompute(request).await {
            Ok(()) => {
                self.pending = Some(range);
                self.state = FilterState::Recomputing;
                tracing::debug!(
                    start_date = %range.start_date,
                    end_date = %range.end_date,
                    "Recompute emitted, awaiting refreshed count"
                );
                Some(request)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Recompute collaborator failed");
                None
            }
        }
    }

    /// Refreshed record count pushed by the recompute collaborator.
    ///
    /// Always updates the displayed count. When it confirms the in-flight
    /// recompute (the fields still match the pending range), the form
    /// returns to `Clean` and the baseline becomes the recomputed range, so
    /// later drift is measured against the range this count was computed
    /// for.
    pub fn update_message_count(&mut self, count: i64) {
        self.message_count = count;

        if self.state != FilterState::Recomputing {
            return;
        }
        if let Some(pending) = self.pending {
            if !pending.drifted_from(self.start_date, self.end_date) {
                self.baseline = pending;
                self.pending = None;
                self.state = FilterState::Clean;
            }
        }
    }

    /// Emit the finalized replay submission.
    ///
    /// Guarded: declines silently (returns `None`) unless the form is clean
    /// and a destination is selected. The sink is fire-and-forget.
    pub async fn submit(&mut self) -> Option<ReplaySubmission> {
        if self.is_submit_disabled() {
            return None;
        }
        let destination = self.destination.clone()?;

        let submission = ReplaySubmission {
            start_date: self.start_date,
            end_date: self.end_date,
            destination,
        };
        tracing::info!(destination = %submission.destination, "Submitting replay");
        if let Err(err) = self.sink.submit_replay(submission.clone()).await {
            tracing::warn!(error = %err, "Replay submit sink failed");
        }
        Some(submission)
    }

    fn refresh_state(&mut self) {
        let drifted = self.baseline.drifted_from(self.start_date, self.end_date);
        self.state = if drifted {
            FilterState::Dirty
        } else {
            FilterState::Clean
        };
        // Any date edit supersedes an in-flight recompute
        self.pending = None;
    }
}
