use crate::cache::CacheError;
use crate::config::ConfigurationError;
use crate::lifecycle::{ComponentError, LifecycleError};
use crate::registry::RegistryError;
use thiserror::Error;

/// Crate-level error for callers that mix lifecycle, cache and configuration work
#[derive(Debug, Error)]
pub enum ConduitError {
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, ConduitError>;
