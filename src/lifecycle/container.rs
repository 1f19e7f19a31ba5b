//! # Flow Container
//!
//! Ordered collection of the flows belonging to one flow-group. Phase
//! requests from the platform or flow-group are applied to every member,
//! sequentially and in insertion order, by the installed
//! [`LifecycleStrategy`]. Later members may rely on resources brought up by
//! earlier ones, so there is no parallelism within a request.

use super::component::{LifecycleComponent, ManagedComponent};
use super::errors::{LifecycleError, LifecycleResult};
use super::states::{ComponentState, LifecyclePhase};
use super::strategy::{LifecycleStrategy, PhaseReport};
use crate::config::FlowGroupConfig;
use crate::logging::log_lifecycle_operation;
use crate::resilience::RetryWaiter;
use std::time::Instant;
use tracing::{debug, info};

/// Lifecycle owner for a flow-group's members
#[derive(Debug)]
pub struct FlowContainer {
    name: String,
    members: Vec<ManagedComponent>,
    strategy: Option<LifecycleStrategy>,
    waiter: RetryWaiter,
}

impl FlowContainer {
    /// Create an empty container with no strategy installed
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            strategy: None,
            waiter: RetryWaiter::new(),
        }
    }

    /// Assemble an empty container from flow-group configuration
    pub fn from_config(config: &FlowGroupConfig) -> Self {
        Self::new(config.name.clone()).with_strategy(config.lifecycle_strategy.resolve())
    }

    pub fn with_strategy(mut self, strategy: LifecycleStrategy) -> Self {
        self.set_strategy(strategy);
        self
    }

    pub fn set_strategy(&mut self, strategy: LifecycleStrategy) {
        debug!(container = %self.name, strategy = strategy.name(), "Installing lifecycle strategy");
        self.strategy = Some(strategy);
    }

    pub fn strategy(&self) -> Option<&LifecycleStrategy> {
        self.strategy.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle used to cut short a backoff wait from another thread
    pub fn waiter(&self) -> RetryWaiter {
        self.waiter.clone()
    }

    /// Append a component; it joins in the `Closed` state
    pub fn add(&mut self, component: impl LifecycleComponent + 'static) -> LifecycleResult<()> {
        self.add_boxed(Box::new(component))
    }

    pub fn add_boxed(&mut self, component: Box<dyn LifecycleComponent>) -> LifecycleResult<()> {
        let id = component.unique_id().to_string();
        if self.position(&id).is_some() {
            return Err(LifecycleError::DuplicateComponent {
                container: self.name.clone(),
                component: id,
            });
        }
        self.members.push(ManagedComponent::from_boxed(component));
        Ok(())
    }

    /// Detach a closed component from the container
    pub fn remove(&mut self, id: &str) -> LifecycleResult<Box<dyn LifecycleComponent>> {
        let index = self
            .position(id)
            .ok_or_else(|| LifecycleError::UnknownComponent {
                container: self.name.clone(),
                component: id.to_string(),
            })?;

        let state = self.members[index].state();
        if state.holds_resources() {
            return Err(LifecycleError::ComponentActive {
                component: id.to_string(),
                state,
            });
        }

        Ok(self.members.remove(index).into_inner())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(ManagedComponent::unique_id).collect()
    }

    pub fn state_of(&self, id: &str) -> Option<ComponentState> {
        self.position(id).map(|index| self.members[index].state())
    }

    /// Current state of every member, in processing order
    pub fn states(&self) -> Vec<(String, ComponentState)> {
        self.members
            .iter()
            .map(|m| (m.unique_id().to_string(), m.state()))
            .collect()
    }

    /// Run every member's `prepare` hook in order. Failures are never retried.
    pub fn prepare(&mut self) -> LifecycleResult<()> {
        for member in &mut self.members {
            member
                .prepare()
                .map_err(|source| LifecycleError::Precondition {
                    component: member.unique_id().to_string(),
                    phase: "prepare".to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    pub fn request_init(&mut self) -> LifecycleResult<PhaseReport> {
        self.request_phase(LifecyclePhase::Init)
    }

    pub fn request_start(&mut self) -> LifecycleResult<PhaseReport> {
        self.request_phase(LifecyclePhase::Start)
    }

    pub fn request_stop(&mut self) -> LifecycleResult<PhaseReport> {
        self.request_phase(LifecyclePhase::Stop)
    }

    pub fn request_close(&mut self) -> LifecycleResult<PhaseReport> {
        self.request_phase(LifecyclePhase::Close)
    }

    /// Apply `phase` to every member through the installed strategy
    pub fn request_phase(&mut self, phase: LifecyclePhase) -> LifecycleResult<PhaseReport> {
        if self.members.is_empty() {
            return Ok(PhaseReport::new(phase));
        }

        let strategy = self.strategy.ok_or_else(|| LifecycleError::MissingStrategy {
            container: self.name.clone(),
            members: self.members.len(),
        })?;

        let started = Instant::now();
        let result = strategy.apply(phase, &mut self.members, &self.waiter);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(report) => {
                info!(
                    container = %self.name,
                    phase = %phase,
                    strategy = strategy.name(),
                    advanced = report.advanced.len(),
                    unchanged = report.unchanged.len(),
                    skipped = report.skipped.len(),
                    duration_ms = elapsed_ms,
                    "Phase request completed"
                );
                let status = if report.is_complete() { "success" } else { "partial" };
                log_lifecycle_operation(phase.as_str(), &self.name, None, status, None);
            }
            Err(err) => {
                let details = err.to_string();
                log_lifecycle_operation(
                    phase.as_str(),
                    &self.name,
                    err.component(),
                    "failed",
                    Some(&details),
                );
            }
        }

        result
    }

    /// `init` followed by `start`
    pub fn startup(&mut self) -> LifecycleResult<PhaseReport> {
        self.request_init()?;
        self.request_start()
    }

    /// `stop` followed by `close`
    pub fn shutdown(&mut self) -> LifecycleResult<PhaseReport> {
        self.request_stop()?;
        self.request_close()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.members.iter().position(|m| m.unique_id() == id)
    }
}
