//! Shared test doubles for the integration suites.
#![allow(dead_code)]

use conduit_core::cache::{Cache, CacheError, CacheResult, InMemoryCache};
use conduit_core::lifecycle::{ComponentError, ComponentResult, LifecycleComponent, LifecyclePhase};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Every hook invocation across a set of components, in call order
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, LifecyclePhase)>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, id: &str, phase: LifecyclePhase) {
        self.calls.lock().push((id.to_string(), phase));
    }

    pub fn ids_for(&self, phase: LifecyclePhase) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(_, p)| *p == phase)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn count(&self, id: &str, phase: LifecyclePhase) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(i, p)| i == id && *p == phase)
            .count()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }
}

/// Component whose hooks fail a scripted number of times per phase
pub struct ScriptedComponent {
    id: String,
    failures: HashMap<LifecyclePhase, u32>,
    configuration_error: Option<LifecyclePhase>,
    log: CallLog,
}

impl ScriptedComponent {
    pub fn new(id: &str, log: &CallLog) -> Self {
        Self {
            id: id.to_string(),
            failures: HashMap::new(),
            configuration_error: None,
            log: log.clone(),
        }
    }

    /// Fail the first `times` calls of `phase`
    pub fn failing(mut self, phase: LifecyclePhase, times: u32) -> Self {
        self.failures.insert(phase, times);
        self
    }

    pub fn always_failing(self, phase: LifecyclePhase) -> Self {
        self.failing(phase, u32::MAX)
    }

    /// Fail `phase` with a non-retryable configuration error
    pub fn misconfigured(mut self, phase: LifecyclePhase) -> Self {
        self.configuration_error = Some(phase);
        self
    }

    fn hook(&mut self, phase: LifecyclePhase) -> ComponentResult<()> {
        self.log.record(&self.id, phase);

        if self.configuration_error == Some(phase) {
            return Err(ComponentError::configuration(format!(
                "{} is missing its endpoint",
                self.id
            )));
        }

        match self.failures.get_mut(&phase) {
            Some(remaining) if *remaining > 0 => {
                *remaining = remaining.saturating_sub(1);
                Err(ComponentError::failed(format!("{} not ready to {phase}", self.id)))
            }
            _ => Ok(()),
        }
    }
}

impl LifecycleComponent for ScriptedComponent {
    fn unique_id(&self) -> &str {
        &self.id
    }

    fn init(&mut self) -> ComponentResult<()> {
        self.hook(LifecyclePhase::Init)
    }

    fn start(&mut self) -> ComponentResult<()> {
        self.hook(LifecyclePhase::Start)
    }

    fn stop(&mut self) -> ComponentResult<()> {
        self.hook(LifecyclePhase::Stop)
    }

    fn close(&mut self) -> ComponentResult<()> {
        self.hook(LifecyclePhase::Close)
    }
}

/// In-memory cache that counts reads and can be switched into a failing mode
#[derive(Debug, Default)]
pub struct CountingCache {
    inner: InMemoryCache<String>,
    gets: AtomicU32,
    broken: AtomicBool,
}

impl CountingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        let cache = Self::default();
        cache.broken.store(true, Ordering::SeqCst);
        cache
    }

    pub fn gets(&self) -> u32 {
        self.gets.load(Ordering::SeqCst)
    }

    fn check(&self) -> CacheResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            Err(CacheError::backend("backing store unavailable"))
        } else {
            Ok(())
        }
    }
}

impl Cache for CountingCache {
    type Value = String;

    fn put(&self, key: &str, value: String) -> CacheResult<()> {
        self.check()?;
        self.inner.put(key, value)
    }

    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.get(key)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        self.check()?;
        self.inner.remove(key)
    }

    fn keys(&self) -> CacheResult<HashSet<String>> {
        self.check()?;
        self.inner.keys()
    }

    fn clear(&self) -> CacheResult<()> {
        self.check()?;
        self.inner.clear()
    }

    fn size(&self) -> CacheResult<usize> {
        self.check()?;
        self.inner.size()
    }

    fn provider_name(&self) -> &'static str {
        "counting"
    }
}
