//! Back-office configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default quiet period for the draft autosave watch (milliseconds)
const DEFAULT_DRAFT_QUIET_MS: u64 = 500;

/// Runtime configuration, sourced from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding local state (draft database, logs)
    pub data_dir: String,
    /// Base URL of the REST backend
    pub api_base_url: String,
    /// Quiet period before an edited draft is written to local storage
    pub draft_quiet_ms: u64,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            data_dir: std::env::var("STOCKYARD_DATA_DIR")
                .unwrap_or_else(|_| "./data".into()),
            api_base_url: std::env::var("STOCKYARD_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            draft_quiet_ms: std::env::var("STOCKYARD_DRAFT_QUIET_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DRAFT_QUIET_MS),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Path of the local draft database
    pub fn draft_db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("drafts.redb")
    }

    /// Quiet period as a [`Duration`]
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.draft_quiet_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
