//! Configuration module
//!
//! Environment-driven configuration for the replay console: the application
//! info card, the destination catalogue offered by the filter form, and
//! paging defaults. All values fall back to built-in defaults so the console
//! runs without any environment set up.

use std::env;

use crate::models::DEFAULT_PAGE_SIZE;

// Built-in defaults
const DEFAULT_APP_VERSION: &str = "2.1.4";
const DEFAULT_USER_UID: &str = "usr_abc123def456";
const DEFAULT_ENVIRONMENT: &str = "production";
const DEFAULT_DESTINATIONS: [&str; 6] = [
    "Production Environment",
    "Staging Environment",
    "Development Environment",
    "Test Environment",
    "External System A",
    "External System B",
];

/// Console configuration, read from `REPLAY_*` environment variables.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub app_version: String,
    pub current_user_uid: String,
    pub environment: String,
    /// Destinations offered by the replay filter form
    pub destination_options: Vec<String>,
    pub default_page_size: i64,
}

/// Application info card shown alongside the override form.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AppInfo {
    pub version: String,
    pub user_uid: String,
    pub environment: String,
}

impl ConsoleConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// `REPLAY_DESTINATIONS` is a comma-separated list; empty entries are
    /// dropped.
    pub fn from_env() -> Self {
        let destination_options = env::var("REPLAY_DESTINATIONS")
            .map(|raw| {
                raw.split(',')
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .collect::<Vec<_>>()
            })
            .ok()
            .filter(|opts| !opts.is_empty())
            .unwrap_or_else(|| {
                DEFAULT_DESTINATIONS
                    .iter()
                    .map(|d| d.to_string())
                    .collect()
            });

        let default_page_size = env::var("REPLAY_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        ConsoleConfig {
            app_version: env::var("REPLAY_APP_VERSION")
                .unwrap_or_else(|_| DEFAULT_APP_VERSION.to_string()),
            current_user_uid: env::var("REPLAY_CURRENT_USER_UID")
                .unwrap_or_else(|_| DEFAULT_USER_UID.to_string()),
            environment: env::var("REPLAY_ENVIRONMENT")
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            destination_options,
            default_page_size,
        }
    }

    /// Snapshot of the application info card.
    pub fn app_info(&self) -> AppInfo {
        AppInfo {
            version: self.app_version.clone(),
            user_uid: self.current_user_uid.clone(),
            environment: self.environment.clone(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            app_version: DEFAULT_APP_VERSION.to_string(),
            current_user_uid: DEFAULT_USER_UID.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            destination_options: DEFAULT_DESTINATIONS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
