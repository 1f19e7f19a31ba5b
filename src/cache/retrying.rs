//! # Retrying Cache Decorator
//!
//! Wraps a delegate [`Cache`] so that a read of a key that is not there yet
//! is re-polled at a fixed interval until a value appears or the retry
//! budget runs out, e.g. a consumer waiting for a correlated reply that
//! another thread will store.
//!
//! ## Design
//!
//! - Only `get` is retried. A miss after `1 + max_attempts` polls returns
//!   `Ok(None)`, never an error.
//! - A delegate error is returned immediately; it does not consume the budget.
//! - `put`, `remove`, `keys`, `clear` and `size` pass straight through.
//! - No locking is added: the delegate must already be thread-safe.
//! - The decorator is itself a lifecycle component. `prepare`, `init` and
//!   `start` fail with a non-retryable configuration error when no delegate
//!   is configured.

use super::errors::{CacheError, CacheResult};
use super::traits::Cache;
use crate::lifecycle::{ComponentError, ComponentResult, LifecycleComponent};
use crate::logging::log_cache_operation;
use crate::resilience::{RetryPolicy, RetryPolicyConfig, RetryWaiter};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace};
use uuid::Uuid;

#[derive(Debug)]
pub struct RetryingCache<C> {
    unique_id: String,
    delegate: Option<C>,
    policy: RetryPolicy,
    waiter: RetryWaiter,
}

impl<C: Cache> RetryingCache<C> {
    pub fn new(delegate: C, policy: RetryPolicy) -> Self {
        let mut cache = Self::unconfigured(policy);
        cache.delegate = Some(delegate);
        cache
    }

    /// Resolve `config` defaults once and wrap `delegate`
    pub fn from_config(delegate: C, config: &RetryPolicyConfig) -> Self {
        Self::new(delegate, config.resolve())
    }

    /// A decorator awaiting its delegate; lifecycle `init` fails until one is set
    pub fn unconfigured(policy: RetryPolicy) -> Self {
        Self {
            unique_id: format!("retrying-cache-{}", Uuid::new_v4()),
            delegate: None,
            policy,
            waiter: RetryWaiter::new(),
        }
    }

    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = unique_id.into();
        self
    }

    pub fn set_delegate(&mut self, delegate: C) {
        self.delegate = Some(delegate);
    }

    pub fn delegate(&self) -> Option<&C> {
        self.delegate.as_ref()
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Handle used to cut short a read's backoff wait from another thread
    pub fn waiter(&self) -> RetryWaiter {
        self.waiter.clone()
    }

    fn require_delegate(&self) -> CacheResult<&C> {
        self.delegate
            .as_ref()
            .ok_or_else(|| CacheError::MissingDelegate {
                cache: self.unique_id.clone(),
            })
    }

    fn check_configured(&self) -> ComponentResult<()> {
        self.require_delegate()
            .map(|_| ())
            .map_err(|err| ComponentError::configuration(err.to_string()))
    }
}

impl<C: Cache> Cache for RetryingCache<C> {
    type Value = C::Value;

    fn put(&self, key: &str, value: Self::Value) -> CacheResult<()> {
        self.require_delegate()?.put(key, value)
    }

    fn get(&self, key: &str) -> CacheResult<Option<Self::Value>> {
        let delegate = self.require_delegate()?;
        let started = Instant::now();

        let value = self.policy.poll(&self.waiter, |attempt| {
            let value = delegate.get(key)?;
            if value.is_none() {
                trace!(key = key, attempt = attempt, "Cache miss");
            }
            Ok::<_, CacheError>(value)
        })?;

        if value.is_none() {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            debug!(
                key = key,
                attempts = self.policy.total_attempts(),
                elapsed_ms = elapsed_ms,
                "Cache value absent after retries"
            );
            log_cache_operation("get", self.provider_name(), key, "absent", Some(elapsed_ms));
        }

        Ok(value)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        self.require_delegate()?.remove(key)
    }

    fn keys(&self) -> CacheResult<HashSet<String>> {
        self.require_delegate()?.keys()
    }

    fn clear(&self) -> CacheResult<()> {
        self.require_delegate()?.clear()
    }

    fn size(&self) -> CacheResult<usize> {
        self.require_delegate()?.size()
    }

    fn provider_name(&self) -> &'static str {
        "retrying"
    }
}

impl<C: Cache + 'static> LifecycleComponent for RetryingCache<C> {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn prepare(&mut self) -> ComponentResult<()> {
        self.check_configured()
    }

    fn init(&mut self) -> ComponentResult<()> {
        self.check_configured()
    }

    fn start(&mut self) -> ComponentResult<()> {
        self.check_configured()
    }

    fn stop(&mut self) -> ComponentResult<()> {
        Ok(())
    }

    fn close(&mut self) -> ComponentResult<()> {
        Ok(())
    }
}
