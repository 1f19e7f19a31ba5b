//! # Shared Component Registry
//!
//! Some collaborators (a transaction manager, a connection pool) are shared
//! by every flow in a platform and located by name. [`SharedComponentRegistry`]
//! holds them; [`SharedComponent`] resolves one lazily and memoizes it, so
//! the lookup happens at most once per holder. A failed lookup is a
//! precondition error and is never retried.

use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::debug;

/// Failures locating a shared component
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No shared component registered under '{name}'")]
    NotFound { name: String },

    #[error("Shared component '{name}' is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Name-keyed store of shared, thread-safe instances
#[derive(Default)]
pub struct SharedComponentRegistry {
    entries: DashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl SharedComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `name`; `true` when an earlier instance was replaced
    pub fn register<T>(&self, name: impl Into<String>, component: Arc<T>) -> bool
    where
        T: Any + Send + Sync,
    {
        let name = name.into();
        debug!(name = %name, type_name = std::any::type_name::<T>(), "Registering shared component");
        self.entries.insert(name, component).is_some()
    }

    pub fn deregister(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `name` and downcast it to `T`
    pub fn lookup<T>(&self, name: &str) -> RegistryResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let entry = self
            .entries
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })?;

        entry
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }
}

impl fmt::Debug for SharedComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        f.debug_struct("SharedComponentRegistry")
            .field("names", &names)
            .finish()
    }
}

/// Lazily resolved, memoized reference to a registry entry
pub struct SharedComponent<T> {
    name: String,
    resolved: OnceLock<Arc<T>>,
}

impl<T> SharedComponent<T>
where
    T: Any + Send + Sync,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Resolve against `registry` on first call; later calls return the cached instance
    pub fn resolve(&self, registry: &SharedComponentRegistry) -> RegistryResult<Arc<T>> {
        if let Some(component) = self.resolved.get() {
            return Ok(Arc::clone(component));
        }

        let component = registry.lookup::<T>(&self.name)?;
        Ok(Arc::clone(self.resolved.get_or_init(|| component)))
    }
}

impl<T> fmt::Debug for SharedComponent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedComponent")
            .field("name", &self.name)
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TransactionManager {
        id: u32,
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = SharedComponentRegistry::new();
        assert!(!registry.register("tx", Arc::new(TransactionManager { id: 7 })));

        let found = registry.lookup::<TransactionManager>("tx").unwrap();
        assert_eq!(found.id, 7);
        assert!(registry.contains("tx"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_failures() {
        let registry = SharedComponentRegistry::new();
        registry.register("tx", Arc::new(TransactionManager { id: 1 }));

        assert_eq!(
            registry.lookup::<TransactionManager>("missing").unwrap_err(),
            RegistryError::NotFound {
                name: "missing".to_string()
            }
        );
        assert!(matches!(
            registry.lookup::<String>("tx").unwrap_err(),
            RegistryError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_deregister_removes_entry() {
        let registry = SharedComponentRegistry::new();
        registry.register("tx", Arc::new(TransactionManager { id: 1 }));

        assert!(registry.deregister("tx"));
        assert!(!registry.deregister("tx"));
        assert!(registry.is_empty());
        assert!(matches!(
            registry.lookup::<TransactionManager>("tx"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_resolution_is_memoized() {
        let registry = SharedComponentRegistry::new();
        registry.register("tx", Arc::new(TransactionManager { id: 1 }));

        let shared = SharedComponent::<TransactionManager>::new("tx");
        assert!(!shared.is_resolved());
        let first = shared.resolve(&registry).unwrap();

        registry.register("tx", Arc::new(TransactionManager { id: 2 }));
        let second = shared.resolve(&registry).unwrap();

        assert!(shared.is_resolved());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.id, 1);
    }

    #[test]
    fn test_failed_resolution_is_not_cached() {
        let registry = SharedComponentRegistry::new();
        let shared = SharedComponent::<TransactionManager>::new("tx");
        assert!(shared.resolve(&registry).is_err());

        registry.register("tx", Arc::new(TransactionManager { id: 3 }));
        assert_eq!(shared.resolve(&registry).unwrap().id, 3);
    }
}
