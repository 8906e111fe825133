//! Data models for the replay console
//!
//! This module contains the data structures shared by the console
//! components, organized by domain: profile overrides, replay requests and
//! their emitted payloads, and result paging.

mod page;
mod profile_override;
mod replay;

// Re-export all models for convenient imports
pub use page::*;
pub use profile_override::*;
pub use replay::*;
