use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state shared by every pluggable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentState {
    /// Constructed or fully released; the initial state
    #[default]
    Closed,
    /// Resources acquired, not yet processing
    Initialised,
    /// Actively processing
    Started,
    /// Processing paused, resources still held
    Stopped,
}

impl ComponentState {
    /// The state reached by applying `phase`, or `None` when no edge exists.
    ///
    /// ```text
    /// Closed      --init-->  Initialised
    /// Initialised --start--> Started
    /// Started     --stop-->  Stopped
    /// Stopped     --start--> Started
    /// Initialised --close--> Closed
    /// Stopped     --close--> Closed
    /// ```
    pub fn target_for(&self, phase: LifecyclePhase) -> Option<ComponentState> {
        match (self, phase) {
            (Self::Closed, LifecyclePhase::Init) => Some(Self::Initialised),
            (Self::Initialised, LifecyclePhase::Start) => Some(Self::Started),
            (Self::Stopped, LifecyclePhase::Start) => Some(Self::Started),
            (Self::Started, LifecyclePhase::Stop) => Some(Self::Stopped),
            (Self::Initialised, LifecyclePhase::Close) => Some(Self::Closed),
            (Self::Stopped, LifecyclePhase::Close) => Some(Self::Closed),
            _ => None,
        }
    }

    /// Check whether `phase` has a legal edge out of this state
    pub fn accepts(&self, phase: LifecyclePhase) -> bool {
        self.target_for(phase).is_some()
    }

    /// Check if the component is processing
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Started)
    }

    /// Check if the component holds resources (anything but `Closed`)
    pub fn holds_resources(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Initialised => write!(f, "initialised"),
            Self::Started => write!(f, "started"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

impl std::str::FromStr for ComponentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(Self::Closed),
            "initialised" => Ok(Self::Initialised),
            "started" => Ok(Self::Started),
            "stopped" => Ok(Self::Stopped),
            _ => Err(format!("Invalid component state: {s}")),
        }
    }
}

/// A lifecycle phase applied uniformly across a container's members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Init,
    Start,
    Stop,
    Close,
}

impl LifecyclePhase {
    pub const ALL: [LifecyclePhase; 4] = [Self::Init, Self::Start, Self::Stop, Self::Close];

    /// Get a string representation of the phase for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LifecyclePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Self::Init),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "close" => Ok(Self::Close),
            _ => Err(format!("Invalid lifecycle phase: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_edges() {
        use ComponentState::*;
        use LifecyclePhase::*;

        assert_eq!(Closed.target_for(Init), Some(Initialised));
        assert_eq!(Initialised.target_for(Start), Some(Started));
        assert_eq!(Started.target_for(Stop), Some(Stopped));
        assert_eq!(Stopped.target_for(Start), Some(Started));
        assert_eq!(Initialised.target_for(Close), Some(Closed));
        assert_eq!(Stopped.target_for(Close), Some(Closed));
    }

    #[test]
    fn test_missing_edges() {
        use ComponentState::*;
        use LifecyclePhase::*;

        let legal = 6;
        let total = [Closed, Initialised, Started, Stopped]
            .iter()
            .flat_map(|state| LifecyclePhase::ALL.into_iter().map(move |phase| state.accepts(phase)))
            .filter(|accepted| *accepted)
            .count();
        assert_eq!(total, legal);

        assert!(!Initialised.accepts(Init));
        assert!(!Started.accepts(Init));
        assert!(!Started.accepts(Close));
        assert!(!Closed.accepts(Start));
        assert!(!Closed.accepts(Close));
    }

    #[test]
    fn test_state_predicates() {
        assert!(ComponentState::Started.is_running());
        assert!(!ComponentState::Stopped.is_running());
        assert!(!ComponentState::Closed.holds_resources());
        assert!(ComponentState::Stopped.holds_resources());
        assert_eq!(ComponentState::default(), ComponentState::Closed);
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(ComponentState::Initialised.to_string(), "initialised");
        assert_eq!("stopped".parse::<ComponentState>().unwrap(), ComponentState::Stopped);
        assert!("running".parse::<ComponentState>().is_err());

        assert_eq!(LifecyclePhase::Close.to_string(), "close");
        assert_eq!("start".parse::<LifecyclePhase>().unwrap(), LifecyclePhase::Start);
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&ComponentState::Initialised).unwrap();
        assert_eq!(json, "\"initialised\"");
        let parsed: ComponentState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ComponentState::Initialised);
    }
}
