use conduit_core::lifecycle::{
    ComponentResult, ComponentState, FlowContainer, LifecycleComponent, LifecycleError,
    LifecycleStrategy,
};
use conduit_core::registry::{SharedComponent, SharedComponentRegistry};
use conduit_core::resilience::RetryPolicy;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct TransactionManager {
    commits: AtomicU32,
}

struct TransactionalProducer {
    id: String,
    registry: Arc<SharedComponentRegistry>,
    tx: SharedComponent<TransactionManager>,
    init_calls: Arc<AtomicU32>,
}

impl TransactionalProducer {
    fn new(id: &str, registry: &Arc<SharedComponentRegistry>, init_calls: &Arc<AtomicU32>) -> Self {
        Self {
            id: id.to_string(),
            registry: Arc::clone(registry),
            tx: SharedComponent::new("default-tx"),
            init_calls: Arc::clone(init_calls),
        }
    }
}

impl LifecycleComponent for TransactionalProducer {
    fn unique_id(&self) -> &str {
        &self.id
    }

    fn init(&mut self) -> ComponentResult<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        let tx = self.tx.resolve(&self.registry)?;
        tx.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn start(&mut self) -> ComponentResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> ComponentResult<()> {
        Ok(())
    }

    fn close(&mut self) -> ComponentResult<()> {
        Ok(())
    }
}

fn strategy() -> LifecycleStrategy {
    LifecycleStrategy::RetryAndFail(RetryPolicy::new(3, Duration::from_secs(60)))
}

#[test]
fn test_members_share_one_registered_instance() {
    let registry = Arc::new(SharedComponentRegistry::new());
    let tx = Arc::new(TransactionManager {
        commits: AtomicU32::new(0),
    });
    registry.register("default-tx", Arc::clone(&tx));

    let calls = Arc::new(AtomicU32::new(0));
    let mut container = FlowContainer::new("payments").with_strategy(strategy());
    container
        .add(TransactionalProducer::new("producer-a", &registry, &calls))
        .unwrap();
    container
        .add(TransactionalProducer::new("producer-b", &registry, &calls))
        .unwrap();

    container.request_init().unwrap();

    assert_eq!(tx.commits.load(Ordering::SeqCst), 2);
    assert_eq!(container.state_of("producer-b"), Some(ComponentState::Initialised));
}

#[test]
fn test_unresolvable_shared_component_is_precondition_failure() {
    let registry = Arc::new(SharedComponentRegistry::new());
    let calls = Arc::new(AtomicU32::new(0));
    let mut container = FlowContainer::new("payments").with_strategy(strategy());
    container
        .add(TransactionalProducer::new("producer-a", &registry, &calls))
        .unwrap();

    let started = Instant::now();
    let err = container.request_init().unwrap_err();

    assert!(matches!(err, LifecycleError::Precondition { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(container.state_of("producer-a"), Some(ComponentState::Closed));
}
