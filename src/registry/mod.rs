//! # Registry Infrastructure
//!
//! Name-based lookup of components shared across flows.
//!
//! ## Usage
//!
//! ```rust
//! use conduit_core::registry::{SharedComponent, SharedComponentRegistry};
//! use std::sync::Arc;
//!
//! struct TransactionManager;
//!
//! let registry = SharedComponentRegistry::new();
//! registry.register("default-tx", Arc::new(TransactionManager));
//!
//! let tx = SharedComponent::<TransactionManager>::new("default-tx");
//! assert!(tx.resolve(&registry).is_ok());
//! ```

pub mod shared;

pub use shared::{RegistryError, RegistryResult, SharedComponent, SharedComponentRegistry};
