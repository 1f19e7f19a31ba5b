//! # System Constants
//!
//! Documented defaults and well-known names that define the operational
//! boundaries of the lifecycle and resilience core.
//!
//! Every nullable retry setting resolves to one of the defaults below at
//! construction time, so `max_attempts: None` and `max_attempts: Some(2)`
//! behave identically.

use std::time::Duration;

/// Retries performed after the first attempt when `max_attempts` is unset.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Wait between attempts when `retry_interval` is unset, in milliseconds.
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 2000;

/// [`DEFAULT_RETRY_INTERVAL_MS`] as a [`Duration`].
pub const fn default_retry_interval() -> Duration {
    Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS)
}

/// Environment variables consulted by the configuration and logging layers
pub mod env {
    /// Deployment environment (`development`, `test`, `production`)
    pub const ENVIRONMENT: &str = "CONDUIT_ENV";
    /// Generic fallback for the deployment environment
    pub const APP_ENVIRONMENT: &str = "APP_ENV";
    /// Directory holding `conduit-config.yaml`
    pub const CONFIG_DIR: &str = "CONDUIT_CONFIG_DIR";
    /// Log output format; `json` switches to structured JSON lines
    pub const LOG_FORMAT: &str = "CONDUIT_LOG_FORMAT";
}

/// Configuration file discovery
pub mod files {
    /// Candidate file names, searched in order
    pub const CONFIG_FILE_NAMES: [&str; 2] = ["conduit-config.yaml", "conduit-config.yml"];
    /// Directory used when `CONDUIT_CONFIG_DIR` is unset
    pub const DEFAULT_CONFIG_DIR: &str = "config";
    /// Upper bound on configuration file size
    pub const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;
    /// Environment sections stripped from the merged document
    pub const ENVIRONMENT_SECTIONS: [&str; 3] = ["development", "test", "production"];
}
