use super::errors::CacheResult;
use std::collections::HashSet;
use std::sync::Arc;

/// Key/value cache contract shared by backends and decorators.
///
/// `get` reports a miss as `Ok(None)`; `Err` is reserved for backend
/// failures. `remove` of an absent key is a no-op. Implementations must be
/// safe to call from several threads at once.
pub trait Cache: Send + Sync {
    type Value: Clone + Send + Sync;

    fn put(&self, key: &str, value: Self::Value) -> CacheResult<()>;

    fn get(&self, key: &str) -> CacheResult<Option<Self::Value>>;

    fn remove(&self, key: &str) -> CacheResult<()>;

    fn keys(&self) -> CacheResult<HashSet<String>>;

    fn clear(&self) -> CacheResult<()>;

    fn size(&self) -> CacheResult<usize>;

    /// Get the name of the cache provider
    fn provider_name(&self) -> &'static str;
}

impl<C> Cache for Arc<C>
where
    C: Cache + ?Sized,
{
    type Value = C::Value;

    fn put(&self, key: &str, value: Self::Value) -> CacheResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> CacheResult<Option<Self::Value>> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> CacheResult<HashSet<String>> {
        (**self).keys()
    }

    fn clear(&self) -> CacheResult<()> {
        (**self).clear()
    }

    fn size(&self) -> CacheResult<usize> {
        (**self).size()
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
