//! Replay Console view-models
//!
//! The three components of the replay console, expressed as headless state
//! machines over the collaborator contracts in replay-services:
//!
//! - [`OverrideForm`]: mutually exclusive profile-override toggles.
//! - [`ReplayFilterForm`]: date-range filter with a Clean/Dirty/Recomputing
//!   state machine gating submission.
//! - [`ReplayResultsTable`]: paged replay-request table with a
//!   stale-response guard and row start/delete actions.
//!
//! Rendering is out of scope: a UI shell reads the accessors and routes its
//! events into the operations.

pub mod filter_form;
pub mod override_form;
pub mod results_table;

pub use filter_form::{FilterState, ReplayFilterForm};
pub use override_form::OverrideForm;
pub use results_table::ReplayResultsTable;
