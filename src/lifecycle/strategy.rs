//! # Lifecycle Strategies
//!
//! A strategy drives every member of a container through one phase, in
//! order, and decides what a member's failure means for the batch:
//!
//! | Strategy | Retries | On exhaustion |
//! |---|---|---|
//! | `NoRetry` | none | abort the batch, return the failure |
//! | `RetryAndContinue` | `max_attempts` | record the member as skipped, carry on |
//! | `RetryAndFail` | `max_attempts` | abort the batch, return the failure |
//!
//! Non-retryable (configuration) errors abort the batch under every strategy.
//! No strategy rolls back members already advanced earlier in the batch.

use super::component::{ComponentError, ManagedComponent, Transition};
use super::errors::{LifecycleError, LifecycleResult};
use super::states::LifecyclePhase;
use crate::resilience::{RetryError, RetryPolicy, RetryWaiter};
use tracing::{debug, error, warn};

/// Policy for applying a phase to a collection of members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleStrategy {
    /// First failure propagates immediately
    #[default]
    NoRetry,
    /// Bounded retry per member, then skip it and proceed
    RetryAndContinue(RetryPolicy),
    /// Bounded retry per member, then abort the whole batch
    RetryAndFail(RetryPolicy),
}

impl LifecycleStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoRetry => "no_retry",
            Self::RetryAndContinue(_) => "retry_and_continue",
            Self::RetryAndFail(_) => "retry_and_fail",
        }
    }

    /// Budget applied to each member's transition
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::NoRetry => RetryPolicy::no_retry(),
            Self::RetryAndContinue(policy) | Self::RetryAndFail(policy) => *policy,
        }
    }

    /// Apply `phase` to `members` sequentially, in slice order.
    pub fn apply(
        &self,
        phase: LifecyclePhase,
        members: &mut [ManagedComponent],
        waiter: &RetryWaiter,
    ) -> LifecycleResult<PhaseReport> {
        let policy = self.retry_policy();
        let mut report = PhaseReport::new(phase);

        for member in members.iter_mut() {
            let outcome = policy.execute(waiter, |attempt| {
                member.apply(phase).inspect_err(|err| {
                    warn!(
                        component = %member.unique_id(),
                        phase = %phase,
                        attempt = attempt,
                        max_attempts = policy.max_attempts(),
                        error = %err,
                        "Lifecycle transition attempt failed"
                    );
                })
            });

            let component = member.unique_id().to_string();
            match outcome {
                Ok(Transition::Advanced { from, to }) => {
                    debug!(component = %component, phase = %phase, from = %from, to = %to, "Component transitioned");
                    report.advanced.push(component);
                }
                Ok(Transition::Unchanged(_)) => report.unchanged.push(component),
                Err(RetryError::Aborted { error, .. }) => {
                    error!(component = %component, phase = %phase, error = %error, "Non-retryable lifecycle failure");
                    return Err(LifecycleError::Precondition {
                        component,
                        phase: phase.to_string(),
                        source: error,
                    });
                }
                Err(RetryError::Exhausted {
                    attempts,
                    last_error,
                }) => self.on_exhausted(&mut report, component, phase, attempts, last_error)?,
            }
        }

        Ok(report)
    }

    fn on_exhausted(
        &self,
        report: &mut PhaseReport,
        component: String,
        phase: LifecyclePhase,
        attempts: u32,
        last_error: ComponentError,
    ) -> LifecycleResult<()> {
        match self {
            Self::NoRetry => Err(LifecycleError::TransitionFailed {
                component,
                phase,
                source: last_error,
            }),
            Self::RetryAndFail(_) => {
                error!(
                    component = %component,
                    phase = %phase,
                    attempts = attempts,
                    error = %last_error,
                    "Retries exhausted, aborting phase"
                );
                Err(LifecycleError::RetriesExhausted {
                    component,
                    phase,
                    attempts,
                    source: last_error,
                })
            }
            Self::RetryAndContinue(_) => {
                warn!(
                    component = %component,
                    phase = %phase,
                    attempts = attempts,
                    error = %last_error,
                    "Retries exhausted, skipping component"
                );
                report.skipped.push(SkippedComponent {
                    component,
                    attempts,
                    error: last_error.to_string(),
                });
                Ok(())
            }
        }
    }
}

/// A member left in its pre-attempt state by `RetryAndContinue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedComponent {
    pub component: String,
    pub attempts: u32,
    pub error: String,
}

/// Outcome of a successful phase request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: LifecyclePhase,
    /// Members whose state moved, in processing order
    pub advanced: Vec<String>,
    /// Members with no edge for the phase
    pub unchanged: Vec<String>,
    /// Members that exhausted their retries
    pub skipped: Vec<SkippedComponent>,
}

impl PhaseReport {
    pub fn new(phase: LifecyclePhase) -> Self {
        Self {
            phase,
            advanced: Vec::new(),
            unchanged: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Check if every member either advanced or had nothing to do
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn total(&self) -> usize {
        self.advanced.len() + self.unchanged.len() + self.skipped.len()
    }
}
