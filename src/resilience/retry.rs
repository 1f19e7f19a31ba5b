//! # Bounded Retry With Fixed Backoff
//!
//! [`RetryPolicyConfig`] is what configuration files carry: both fields are
//! optional. It is resolved exactly once into an immutable [`RetryPolicy`],
//! which drives two loops:
//!
//! - [`RetryPolicy::execute`] retries a fallible operation until it succeeds,
//!   fails with a non-retryable error, or the budget is exhausted.
//! - [`RetryPolicy::poll`] re-polls a lookup until it yields a value or the
//!   budget is exhausted. Absence is not an error; a lookup error aborts at once.
//!
//! Both perform at most `1 + max_attempts` attempts and wait `retry_interval`
//! between consecutive attempts, never after the last one.
//!
//! ```rust
//! use conduit_core::resilience::{RetryPolicy, RetryWaiter};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(2, Duration::ZERO);
//! let mut calls = 0;
//! let result: Result<u32, _> = policy.execute(&RetryWaiter::new(), |_attempt| {
//!     calls += 1;
//!     if calls < 3 { Err(std::io::Error::other("not yet")) } else { Ok(calls) }
//! });
//! assert_eq!(result.unwrap(), 3);
//! ```

use super::time_interval::TimeInterval;
use super::waiter::{RetryWaiter, WaitOutcome};
use crate::constants::{default_retry_interval, DEFAULT_MAX_ATTEMPTS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Classification of an error as transient (worth retrying) or not
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for std::io::Error {
    fn is_retryable(&self) -> bool {
        true
    }
}

impl Retryable for anyhow::Error {
    fn is_retryable(&self) -> bool {
        true
    }
}

/// Nullable retry settings as read from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicyConfig {
    /// Retries after the first attempt; `None` means [`DEFAULT_MAX_ATTEMPTS`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Wait between attempts; `None` means [`crate::constants::DEFAULT_RETRY_INTERVAL_MS`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<TimeInterval>,
}

impl RetryPolicyConfig {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_retry_interval(mut self, retry_interval: impl Into<TimeInterval>) -> Self {
        self.retry_interval = Some(retry_interval.into());
        self
    }

    /// Apply defaults to unset fields
    pub fn resolve(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(
            self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            self.retry_interval
                .map(|interval| interval.to_duration())
                .unwrap_or_else(default_retry_interval),
        );
        debug!(
            max_attempts = policy.max_attempts,
            retry_interval_ms = policy.retry_interval.as_millis() as u64,
            "Resolved retry policy"
        );
        policy
    }
}

impl From<RetryPolicyConfig> for RetryPolicy {
    fn from(config: RetryPolicyConfig) -> Self {
        config.resolve()
    }
}

/// Resolved, immutable retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, default_retry_interval())
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, retry_interval: Duration) -> Self {
        Self {
            max_attempts,
            retry_interval,
        }
    }

    /// A single attempt, no waiting
    pub const fn no_retry() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Retries permitted after the first attempt
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// `1 + max_attempts`
    pub const fn total_attempts(&self) -> u64 {
        self.max_attempts as u64 + 1
    }

    /// Longest time spent waiting if every attempt fails
    pub fn worst_case_wait(&self) -> Duration {
        self.retry_interval.saturating_mul(self.max_attempts)
    }

    /// Run `operation` until it succeeds or the budget runs out.
    ///
    /// `operation` receives the 1-based attempt number. Errors for which
    /// [`Retryable::is_retryable`] is false end the loop immediately.
    pub fn execute<T, E, F>(&self, waiter: &RetryWaiter, mut operation: F) -> Result<T, RetryError<E>>
    where
        E: Retryable,
        F: FnMut(u32) -> Result<T, E>,
    {
        let mut failures: u32 = 0;
        loop {
            let attempt = failures.saturating_add(1);
            match operation(attempt) {
                Ok(value) => return Ok(value),
                Err(error) if !error.is_retryable() => {
                    return Err(RetryError::Aborted { attempt, error });
                }
                Err(error) => {
                    failures = attempt;
                    if failures > self.max_attempts {
                        return Err(RetryError::Exhausted {
                            attempts: failures,
                            last_error: error,
                        });
                    }
                    self.pause(waiter, attempt);
                }
            }
        }
    }

    /// Re-poll `probe` until it yields `Some`, returning `Ok(None)` once the
    /// budget is exhausted. A probe error is returned immediately.
    pub fn poll<T, E, F>(&self, waiter: &RetryWaiter, mut probe: F) -> Result<Option<T>, E>
    where
        F: FnMut(u32) -> Result<Option<T>, E>,
    {
        let mut misses: u32 = 0;
        loop {
            let attempt = misses.saturating_add(1);
            if let Some(value) = probe(attempt)? {
                return Ok(Some(value));
            }
            misses = attempt;
            if misses > self.max_attempts {
                return Ok(None);
            }
            self.pause(waiter, attempt);
        }
    }

    fn pause(&self, waiter: &RetryWaiter, attempt: u32) {
        if let WaitOutcome::Interrupted = waiter.wait(self.retry_interval) {
            trace!(attempt = attempt, "Retry wait interrupted, retrying now");
        }
    }
}

/// Terminal failure of [`RetryPolicy::execute`]
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every permitted attempt failed
    #[error("retries exhausted after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: E },

    /// An attempt failed with an error that must not be retried
    #[error("non-retryable failure on attempt {attempt}: {error}")]
    Aborted { attempt: u32, error: E },
}

impl<E> RetryError<E> {
    /// Attempts performed before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
            Self::Aborted { attempt, .. } => *attempt,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// The final error observed
    pub fn into_inner(self) -> E {
        match self {
            Self::Exhausted { last_error, .. } => last_error,
            Self::Aborted { error, .. } => error,
        }
    }
}
