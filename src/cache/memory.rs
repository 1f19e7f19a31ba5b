//! In-process cache backed by a concurrent map.
//!
//! No expiry and no eviction: entries live until removed or cleared. Used as
//! the default delegate and in tests.

use super::errors::CacheResult;
use super::traits::Cache;
use dashmap::DashMap;
use std::collections::HashSet;

#[derive(Debug)]
pub struct InMemoryCache<V> {
    entries: DashMap<String, V>,
}

impl<V> Default for InMemoryCache<V> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V> InMemoryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V> Cache for InMemoryCache<V>
where
    V: Clone + Send + Sync,
{
    type Value = V;

    fn put(&self, key: &str, value: V) -> CacheResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> CacheResult<Option<V>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> CacheResult<HashSet<String>> {
        Ok(self.entries.iter().map(|entry| entry.key().clone()).collect())
    }

    fn clear(&self) -> CacheResult<()> {
        self.entries.clear();
        Ok(())
    }

    fn size(&self) -> CacheResult<usize> {
        Ok(self.entries.len())
    }

    fn provider_name(&self) -> &'static str {
        "in_memory"
    }
}
