#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Conduit Core
//!
//! Lifecycle and resilience core for an integration-flow runtime.
//!
//! ## Overview
//!
//! Every pluggable component (endpoint, transformer, cache, flow) moves
//! through one four-state lifecycle. Flow-groups hold their flows in a
//! [`lifecycle::FlowContainer`], which applies platform phase requests to
//! every member in order through a configurable
//! [`lifecycle::LifecycleStrategy`]:
//!
//! - **No-Retry**: first failure propagates
//! - **Retry-And-Continue**: retry, then skip the member and keep going
//! - **Retry-And-Fail**: retry, then abort the request
//!
//! A [`cache::RetryingCache`] decorator re-polls reads of values that are
//! expected to arrive shortly, using the same [`resilience::RetryPolicy`].
//!
//! ## Module Organization
//!
//! - [`lifecycle`] - State machine, strategies and the flow container
//! - [`resilience`] - Retry policy, time intervals and interruptible waits
//! - [`cache`] - Cache contract, in-memory backend and retry decorator
//! - [`registry`] - Name-based lookup of shared components
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - Structured logging setup and helpers
//! - [`error`] - Crate-level error type
//!
//! ## Quick Start
//!
//! ```rust
//! use conduit_core::config::{FlowGroupConfig, LifecycleStrategyConfig};
//! use conduit_core::lifecycle::FlowContainer;
//! use conduit_core::resilience::RetryPolicyConfig;
//!
//! let group = FlowGroupConfig::new(
//!     "orders",
//!     LifecycleStrategyConfig::RetryAndContinue(RetryPolicyConfig::default().with_max_attempts(3)),
//! );
//! let container = FlowContainer::from_config(&group);
//! assert_eq!(container.strategy().map(|s| s.name()), Some("retry_and_continue"));
//! ```

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod registry;
pub mod resilience;

pub use cache::{Cache, CacheError, InMemoryCache, RetryingCache};
pub use config::{ConduitConfig, ConfigManager, ConfigurationError, FlowGroupConfig};
pub use error::{ConduitError, Result};
pub use lifecycle::{
    ComponentError, ComponentState, FlowContainer, LifecycleComponent, LifecycleError,
    LifecyclePhase, LifecycleStrategy, PhaseReport,
};
pub use resilience::{RetryPolicy, RetryPolicyConfig, RetryWaiter, TimeInterval};
