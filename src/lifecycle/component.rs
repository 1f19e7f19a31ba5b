//! # Pluggable Components
//!
//! [`LifecycleComponent`] is the contract every consumer, producer and
//! processing stage implements. The hooks only do the work; state tracking
//! lives in [`ManagedComponent`], which owns the component on behalf of a
//! flow container and advances its [`ComponentState`] only after a hook
//! returns `Ok`. A failed hook leaves the state exactly as it was.

use super::states::{ComponentState, LifecyclePhase};
use crate::registry::RegistryError;
use crate::resilience::Retryable;
use thiserror::Error;
use tracing::debug;

/// Failure raised by a lifecycle hook
#[derive(Error, Debug)]
pub enum ComponentError {
    /// Transient failure; subject to the retry budget
    #[error("{reason}")]
    Failed { reason: String },

    /// Missing dependency or invalid configuration; never retried
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// Anything else a hook propagates; treated as transient
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComponentError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

impl Retryable for ComponentError {
    fn is_retryable(&self) -> bool {
        !matches!(self, Self::Configuration { .. })
    }
}

impl From<RegistryError> for ComponentError {
    fn from(err: RegistryError) -> Self {
        Self::configuration(err.to_string())
    }
}

pub type ComponentResult<T> = Result<T, ComponentError>;

/// Lifecycle hooks of a pluggable flow component.
///
/// Hooks are invoked by the owning container's strategy, never concurrently
/// for the same component, and only along legal edges of the state table.
pub trait LifecycleComponent: Send {
    /// Stable identity within a container
    fn unique_id(&self) -> &str;

    /// Validate configuration before the first `init`. Never retried.
    fn prepare(&mut self) -> ComponentResult<()> {
        Ok(())
    }

    fn init(&mut self) -> ComponentResult<()>;

    fn start(&mut self) -> ComponentResult<()>;

    fn stop(&mut self) -> ComponentResult<()>;

    fn close(&mut self) -> ComponentResult<()>;
}

/// Result of applying one phase to one member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The hook ran and the state moved along a legal edge
    Advanced {
        from: ComponentState,
        to: ComponentState,
    },
    /// No edge exists for the phase from the current state; nothing ran
    Unchanged(ComponentState),
}

/// A component together with the lifecycle state its container tracks for it
pub struct ManagedComponent {
    component: Box<dyn LifecycleComponent>,
    state: ComponentState,
}

impl ManagedComponent {
    pub fn new(component: impl LifecycleComponent + 'static) -> Self {
        Self::from_boxed(Box::new(component))
    }

    pub fn from_boxed(component: Box<dyn LifecycleComponent>) -> Self {
        Self {
            component,
            state: ComponentState::default(),
        }
    }

    pub fn unique_id(&self) -> &str {
        self.component.unique_id()
    }

    pub fn state(&self) -> ComponentState {
        self.state
    }

    pub fn prepare(&mut self) -> ComponentResult<()> {
        self.component.prepare()
    }

    /// Attempt the transition for `phase` once.
    ///
    /// Returns [`Transition::Unchanged`] without calling any hook when the
    /// current state has no edge for `phase`.
    pub fn apply(&mut self, phase: LifecyclePhase) -> ComponentResult<Transition> {
        let from = self.state;
        let Some(to) = from.target_for(phase) else {
            debug!(
                component = %self.unique_id(),
                phase = %phase,
                state = %from,
                "No transition for phase, skipping"
            );
            return Ok(Transition::Unchanged(from));
        };

        match phase {
            LifecyclePhase::Init => self.component.init()?,
            LifecyclePhase::Start => self.component.start()?,
            LifecyclePhase::Stop => self.component.stop()?,
            LifecyclePhase::Close => self.component.close()?,
        }

        self.state = to;
        Ok(Transition::Advanced { from, to })
    }

    /// Release the component, e.g. after removal from its container
    pub fn into_inner(self) -> Box<dyn LifecycleComponent> {
        self.component
    }
}

impl std::fmt::Debug for ManagedComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedComponent")
            .field("unique_id", &self.unique_id())
            .field("state", &self.state)
            .finish()
    }
}
