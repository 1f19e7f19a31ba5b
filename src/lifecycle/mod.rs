//! # Lifecycle Module
//!
//! The state machine every pluggable component obeys and the machinery that
//! drives a flow-group's members through it.
//!
//! ## Architecture
//!
//! ```text
//! FlowContainer::request_phase(phase)
//!   └── LifecycleStrategy::apply(phase, members)
//!         └── for each member, in order:
//!               RetryPolicy::execute(|| ManagedComponent::apply(phase))
//!                 └── LifecycleComponent::{init,start,stop,close}
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use conduit_core::lifecycle::{
//!     ComponentResult, ComponentState, FlowContainer, LifecycleComponent, LifecycleStrategy,
//! };
//! use conduit_core::resilience::RetryPolicy;
//! use std::time::Duration;
//!
//! struct Consumer;
//!
//! impl LifecycleComponent for Consumer {
//!     fn unique_id(&self) -> &str { "orders-consumer" }
//!     fn init(&mut self) -> ComponentResult<()> { Ok(()) }
//!     fn start(&mut self) -> ComponentResult<()> { Ok(()) }
//!     fn stop(&mut self) -> ComponentResult<()> { Ok(()) }
//!     fn close(&mut self) -> ComponentResult<()> { Ok(()) }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let strategy = LifecycleStrategy::RetryAndFail(RetryPolicy::new(2, Duration::from_millis(10)));
//! let mut container = FlowContainer::new("orders").with_strategy(strategy);
//! container.add(Consumer)?;
//! container.startup()?;
//! assert_eq!(container.state_of("orders-consumer"), Some(ComponentState::Started));
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod container;
pub mod errors;
pub mod states;
pub mod strategy;

pub use component::{ComponentError, ComponentResult, LifecycleComponent, ManagedComponent, Transition};
pub use container::FlowContainer;
pub use errors::{LifecycleError, LifecycleResult};
pub use states::{ComponentState, LifecyclePhase};
pub use strategy::{LifecycleStrategy, PhaseReport, SkippedComponent};
