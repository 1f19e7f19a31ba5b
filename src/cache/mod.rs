//! # Cache Module
//!
//! Key/value cache contract, an in-process backend and the retrying read
//! decorator used when a value is expected to arrive shortly.
//!
//! ```rust
//! use conduit_core::cache::{Cache, InMemoryCache, RetryingCache};
//! use conduit_core::resilience::RetryPolicy;
//! use std::time::Duration;
//!
//! let replies = RetryingCache::new(
//!     InMemoryCache::new(),
//!     RetryPolicy::new(2, Duration::from_millis(5)),
//! );
//! assert_eq!(replies.get("correlation-1").unwrap(), None);
//!
//! replies.put("correlation-1", "ack".to_string()).unwrap();
//! assert_eq!(replies.get("correlation-1").unwrap(), Some("ack".to_string()));
//! ```

pub mod errors;
pub mod memory;
pub mod retrying;
pub mod traits;

pub use errors::{CacheError, CacheResult};
pub use memory::InMemoryCache;
pub use retrying::RetryingCache;
pub use traits::Cache;
