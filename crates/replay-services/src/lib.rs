//! Replay Services Layer
//!
//! This crate defines the collaborator contracts the console view-models
//! emit into (paged query, recompute, submit sink, row actions) and ships an
//! in-memory reference backend implementing all of them. Keep coordination
//! contracts here; keep view-model state in replay-console.

pub mod memory;
pub mod telemetry;
pub mod traits;

pub use memory::InMemoryReplayStore;
pub use telemetry::init_telemetry;
pub use traits::{
    RecomputeService, ReplayActionService, ReplayQueryService, ReplaySubmitSink, ServiceError,
    ServiceResult,
};
