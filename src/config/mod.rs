//! # Conduit Configuration
//!
//! YAML-based configuration for flow-group lifecycle strategies and the
//! cache retry decorator.
//!
//! ## Architecture
//!
//! - **Single file**: `conduit-config.yaml` (or `.yml`) in the config directory
//! - **Environment overrides**: `development`, `test` and `production`
//!   sections are deep-merged over the base for the detected environment
//! - **Explicit validation**: the loaded tree is validated before use
//! - **Resolve once**: nullable retry settings become immutable policies when
//!   a container or cache is assembled
//!
//! ## Usage
//!
//! ```rust,no_run
//! use conduit_core::config::ConfigManager;
//! use conduit_core::lifecycle::FlowContainer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let containers: Vec<FlowContainer> = manager.config().flow_containers();
//! let cache_policy = manager.config().cache_retry_policy();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::lifecycle::{FlowContainer, LifecycleStrategy};
use crate::resilience::{RetryPolicy, RetryPolicyConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConduitConfig {
    #[serde(default)]
    pub flow_groups: Vec<FlowGroupConfig>,

    /// Retry settings for the cache decorator
    #[serde(default)]
    pub cache_retry: RetryPolicyConfig,

    /// Environment the configuration was resolved for; set by the loader
    #[serde(default)]
    pub environment: String,
}

/// One flow-group and the strategy applied to its members
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlowGroupConfig {
    pub name: String,

    #[serde(default)]
    pub lifecycle_strategy: LifecycleStrategyConfig,
}

impl FlowGroupConfig {
    pub fn new(name: impl Into<String>, lifecycle_strategy: LifecycleStrategyConfig) -> Self {
        Self {
            name: name.into(),
            lifecycle_strategy,
        }
    }
}

/// Strategy selection as written in YAML:
///
/// ```yaml
/// lifecycle_strategy:
///   type: retry_and_continue
///   max_attempts: 3
///   retry_interval: 5s
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleStrategyConfig {
    #[default]
    NoRetry,
    RetryAndContinue(RetryPolicyConfig),
    RetryAndFail(RetryPolicyConfig),
}

impl LifecycleStrategyConfig {
    /// Apply retry defaults and build the strategy
    pub fn resolve(&self) -> LifecycleStrategy {
        match self {
            Self::NoRetry => LifecycleStrategy::NoRetry,
            Self::RetryAndContinue(retry) => LifecycleStrategy::RetryAndContinue(retry.resolve()),
            Self::RetryAndFail(retry) => LifecycleStrategy::RetryAndFail(retry.resolve()),
        }
    }

    pub fn retry(&self) -> Option<&RetryPolicyConfig> {
        match self {
            Self::NoRetry => None,
            Self::RetryAndContinue(retry) | Self::RetryAndFail(retry) => Some(retry),
        }
    }
}

impl ConduitConfig {
    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut seen = HashSet::new();

        for (index, group) in self.flow_groups.iter().enumerate() {
            let field = format!("flow_groups[{index}].name");
            if group.name.trim().is_empty() {
                return Err(ConfigurationError::missing_required_field(
                    field,
                    "flow-group configuration",
                ));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(ConfigurationError::invalid_value(
                    field,
                    group.name.clone(),
                    "flow-group names must be unique",
                ));
            }
            if let Some(retry) = group.lifecycle_strategy.retry() {
                Self::validate_retry(
                    &format!("flow_groups[{index}].lifecycle_strategy.retry_interval"),
                    retry,
                )?;
            }
        }

        Self::validate_retry("cache_retry.retry_interval", &self.cache_retry)
    }

    fn validate_retry(field: &str, retry: &RetryPolicyConfig) -> Result<(), ConfigurationError> {
        match retry.retry_interval {
            Some(interval) if interval.checked_millis().is_none() => {
                Err(ConfigurationError::invalid_value(
                    field,
                    interval.to_string(),
                    "interval overflows a millisecond count",
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn flow_group(&self, name: &str) -> Option<&FlowGroupConfig> {
        self.flow_groups.iter().find(|group| group.name == name)
    }

    /// An empty container per configured flow-group, strategy installed
    pub fn flow_containers(&self) -> Vec<FlowContainer> {
        self.flow_groups.iter().map(FlowContainer::from_config).collect()
    }

    pub fn cache_retry_policy(&self) -> RetryPolicy {
        self.cache_retry.resolve()
    }
}
