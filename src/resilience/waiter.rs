//! # Retry Waiter
//!
//! Blocking wait between retry attempts. The wait runs on the calling thread;
//! another thread holding a clone of the same [`RetryWaiter`] can cut it short
//! with [`RetryWaiter::interrupt`]. An early wake means "try again now": it is
//! reported as [`WaitOutcome::Interrupted`], never as an error.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest single wait; larger timeouts are clamped to it
pub const MAX_WAIT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// How a call to [`RetryWaiter::wait`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full interval elapsed
    Elapsed,
    /// Another thread called [`RetryWaiter::interrupt`]
    Interrupted,
}

#[derive(Debug, Default)]
struct WaiterInner {
    /// Bumped on every interrupt; waiters compare against the value they saw on entry
    generation: Mutex<u64>,
    signal: Condvar,
}

/// Interruptible fixed-interval sleeper shared between a retry loop and its controller
#[derive(Debug, Clone, Default)]
pub struct RetryWaiter {
    inner: Arc<WaiterInner>,
}

impl RetryWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block the calling thread for `timeout` or until interrupted
    pub fn wait(&self, timeout: Duration) -> WaitOutcome {
        if timeout.is_zero() {
            return WaitOutcome::Elapsed;
        }

        let mut generation = self.inner.generation.lock();
        let observed = *generation;
        let deadline = deadline_after(Instant::now(), timeout);

        while *generation == observed {
            if self
                .inner
                .signal
                .wait_until(&mut generation, deadline)
                .timed_out()
            {
                return if *generation == observed {
                    WaitOutcome::Elapsed
                } else {
                    WaitOutcome::Interrupted
                };
            }
        }

        WaitOutcome::Interrupted
    }

    /// Wake every thread currently blocked in [`RetryWaiter::wait`]
    pub fn interrupt(&self) {
        let mut generation = self.inner.generation.lock();
        *generation = generation.wrapping_add(1);
        self.inner.signal.notify_all();
    }
}

fn deadline_after(now: Instant, timeout: Duration) -> Instant {
    now.checked_add(timeout.min(MAX_WAIT)).unwrap_or(now)
}
