use super::component::ComponentError;
use super::states::{ComponentState, LifecyclePhase};
use thiserror::Error;

/// Errors surfaced by flow containers and lifecycle strategies
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Container '{container}' has {members} member(s) but no lifecycle strategy installed")]
    MissingStrategy { container: String, members: usize },

    #[error("Component '{component}' is already a member of container '{container}'")]
    DuplicateComponent { container: String, component: String },

    #[error("Component '{component}' is not a member of container '{container}'")]
    UnknownComponent { container: String, component: String },

    #[error("Component '{component}' must be closed before removal (currently {state})")]
    ComponentActive {
        component: String,
        state: ComponentState,
    },

    #[error("Component '{component}' failed to {phase}: {source}")]
    TransitionFailed {
        component: String,
        phase: LifecyclePhase,
        #[source]
        source: ComponentError,
    },

    #[error("Component '{component}' failed to {phase} after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        component: String,
        phase: LifecyclePhase,
        attempts: u32,
        #[source]
        source: ComponentError,
    },

    #[error("Component '{component}' cannot {phase}: {source}")]
    Precondition {
        component: String,
        phase: String,
        #[source]
        source: ComponentError,
    },
}

impl LifecycleError {
    /// The member responsible for the failure, if any
    pub fn component(&self) -> Option<&str> {
        match self {
            Self::MissingStrategy { .. } => None,
            Self::DuplicateComponent { component, .. }
            | Self::UnknownComponent { component, .. }
            | Self::ComponentActive { component, .. }
            | Self::TransitionFailed { component, .. }
            | Self::RetriesExhausted { component, .. }
            | Self::Precondition { component, .. } => Some(component),
        }
    }

    /// Attempts made on the failing member; zero for structural errors
    pub fn attempts(&self) -> u32 {
        match self {
            Self::TransitionFailed { .. } | Self::Precondition { .. } => 1,
            Self::RetriesExhausted { attempts, .. } => *attempts,
            _ => 0,
        }
    }

    /// Check if this is a configuration or precondition problem rather than a transient failure
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            Self::TransitionFailed { .. } | Self::RetriesExhausted { .. }
        )
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
