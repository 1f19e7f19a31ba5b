mod common;

use common::{CallLog, ScriptedComponent};
use conduit_core::cache::{InMemoryCache, RetryingCache};
use conduit_core::config::{ConfigManager, ConfigurationError};
use conduit_core::lifecycle::{ComponentState, LifecyclePhase, LifecycleStrategy};
use conduit_core::resilience::RetryPolicy;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const CONFIG: &str = r#"
flow_groups:
  - name: orders
    lifecycle_strategy:
      type: retry_and_continue
      max_attempts: 1
      retry_interval: 1ms
  - name: billing
    lifecycle_strategy:
      type: retry_and_fail
  - name: audit

cache_retry:
  max_attempts: 4
  retry_interval:
    interval: 250
    unit: milliseconds

production:
  cache_retry:
    retry_interval: 2s
"#;

fn write_config(dir: &Path, file_name: &str, contents: &str) {
    fs::write(dir.join(file_name), contents).unwrap();
}

#[test]
fn test_containers_assembled_from_configuration() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "conduit-config.yaml", CONFIG);

    let manager =
        ConfigManager::load_from_directory_with_env(Some(temp_dir.path().to_path_buf()), "test")
            .unwrap();
    let containers = manager.config().flow_containers();

    let strategies: Vec<_> = containers
        .iter()
        .map(|c| (c.name().to_string(), c.strategy().copied()))
        .collect();
    assert_eq!(
        strategies,
        vec![
            (
                "orders".to_string(),
                Some(LifecycleStrategy::RetryAndContinue(RetryPolicy::new(
                    1,
                    Duration::from_millis(1)
                )))
            ),
            (
                "billing".to_string(),
                Some(LifecycleStrategy::RetryAndFail(RetryPolicy::default()))
            ),
            ("audit".to_string(), Some(LifecycleStrategy::NoRetry)),
        ]
    );
}

#[test]
fn test_configured_container_applies_its_strategy() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "conduit-config.yaml", CONFIG);

    let manager =
        ConfigManager::load_from_directory_with_env(Some(temp_dir.path().to_path_buf()), "test")
            .unwrap();
    let mut orders = manager
        .config()
        .flow_containers()
        .into_iter()
        .find(|c| c.name() == "orders")
        .unwrap();

    let log = CallLog::new();
    orders
        .add(ScriptedComponent::new("flaky", &log).always_failing(LifecyclePhase::Init))
        .unwrap();
    orders.add(ScriptedComponent::new("steady", &log)).unwrap();

    let report = orders.request_init().unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(log.count("flaky", LifecyclePhase::Init), 2);
    assert_eq!(orders.state_of("steady"), Some(ComponentState::Initialised));
}

#[test]
fn test_cache_retry_settings_with_environment_override() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "conduit-config.yml", CONFIG);
    let dir = temp_dir.path().to_path_buf();

    let test_manager = ConfigManager::load_from_directory_with_env(Some(dir.clone()), "test").unwrap();
    let cache = RetryingCache::from_config(
        InMemoryCache::<String>::new(),
        &test_manager.config().cache_retry,
    );
    assert_eq!(cache.policy(), RetryPolicy::new(4, Duration::from_millis(250)));

    let prod_manager = ConfigManager::load_from_directory_with_env(Some(dir), "production").unwrap();
    assert_eq!(prod_manager.environment(), "production");
    assert_eq!(
        prod_manager.config().cache_retry_policy(),
        RetryPolicy::new(4, Duration::from_secs(2))
    );
}

#[test]
fn test_unknown_strategy_type_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        "conduit-config.yaml",
        "flow_groups:\n  - name: orders\n    lifecycle_strategy:\n      type: retry_forever\n",
    );

    let err =
        ConfigManager::load_from_directory_with_env(Some(temp_dir.path().to_path_buf()), "test")
            .unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidYaml { .. }));
}

#[test]
fn test_oversized_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("conduit-config.yaml");
    let file = fs::File::create(&path).unwrap();
    file.set_len(10 * 1024 * 1024 + 1).unwrap();

    let err =
        ConfigManager::load_from_directory_with_env(Some(temp_dir.path().to_path_buf()), "test")
            .unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
}
