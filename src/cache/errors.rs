use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backing store failed rather than reporting a miss
    #[error("Cache backend error: {0}")]
    BackendError(String),

    /// A decorator was used before a delegate cache was configured
    #[error("Cache '{cache}' has no delegate configured")]
    MissingDelegate { cache: String },
}

impl CacheError {
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::BackendError(reason.into())
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
