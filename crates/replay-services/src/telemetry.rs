//! Tracing initialization
//!
//! Standard tracing setup for binaries and long-running test harnesses.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with an env-filter (default directive `replay=debug`).
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "replay=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::debug!("Telemetry initialized");
    Ok(())
}
