//! # Resilience Module
//!
//! Local, synchronous, best-effort fault tolerance shared by the lifecycle
//! strategies and the retrying cache.
//!
//! ## Architecture
//!
//! - **TimeInterval**: `(interval, unit)` configuration primitive
//! - **RetryPolicyConfig / RetryPolicy**: nullable settings resolved once into an immutable budget
//! - **RetryWaiter**: blocking backoff wait that another thread can interrupt
//!
//! ## Usage
//!
//! ```rust
//! use conduit_core::resilience::{RetryPolicyConfig, RetryWaiter, TimeInterval};
//!
//! let policy = RetryPolicyConfig::default()
//!     .with_max_attempts(1)
//!     .with_retry_interval(TimeInterval::milliseconds(1))
//!     .resolve();
//!
//! let lookup: Result<Option<&str>, std::io::Error> =
//!     policy.poll(&RetryWaiter::new(), |_attempt| Ok(None));
//! assert_eq!(lookup.unwrap(), None);
//! ```

pub mod retry;
pub mod time_interval;
pub mod waiter;

pub use retry::{RetryError, RetryPolicy, RetryPolicyConfig, Retryable};
pub use time_interval::{TimeInterval, TimeUnit};
pub use waiter::{RetryWaiter, WaitOutcome};
