//! # Structured Logging Module
//!
//! Environment-aware structured logging for lifecycle requests and cache
//! reads. Console output by default, JSON lines when `CONDUIT_LOG_FORMAT=json`.

use crate::constants::env as env_vars;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// Safe to call repeatedly; only the first call installs a subscriber, and
/// an already-installed global subscriber is left in place.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let json = is_json_format(std::env::var(env_vars::LOG_FORMAT).ok().as_deref());

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let result = if json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .with_ansi(false)
                        .json(),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true)
                        .with_ansi(true),
                )
                .try_init()
        };

        if result.is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(env_vars::ENVIRONMENT)
        .or_else(|_| std::env::var(env_vars::APP_ENVIRONMENT))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

fn is_json_format(value: Option<&str>) -> bool {
    value.is_some_and(|format| format.eq_ignore_ascii_case("json"))
}

/// Log structured data for a lifecycle phase request
pub fn log_lifecycle_operation(
    operation: &str,
    container: &str,
    component: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        container = %container,
        component = component,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "LIFECYCLE_OPERATION"
    );
}

/// Log structured data for cache operations
pub fn log_cache_operation(
    operation: &str,
    provider: &str,
    key: &str,
    status: &str,
    duration_ms: Option<u64>,
) {
    tracing::debug!(
        operation = %operation,
        provider = %provider,
        key = %key,
        status = %status,
        duration_ms = duration_ms,
        timestamp = %Utc::now().to_rfc3339(),
        "CACHE_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
