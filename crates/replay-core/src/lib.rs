//! Replay Core Library
//!
//! This crate provides the domain models, error type, and configuration
//! shared across the replay console components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{AppInfo, ConsoleConfig};
pub use error::AppError;
