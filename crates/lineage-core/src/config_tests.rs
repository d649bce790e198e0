//! Config module tests

use crate::config::{Config, SearchConfig};

#[test]
fn test_config_default() {
    let config = Config::default();

    // Database defaults
    assert!(config.database.path.is_none());
    assert_eq!(config.database.max_connections, 5);

    // Server defaults
    assert_eq!(config.server.bind, "127.0.0.1:8080");

    // Search defaults
    assert_eq!(config.search.default_limit, 20);
    assert_eq!(config.search.max_limit, 100);
    assert_eq!(config.search.concurrency, 8);
    assert_eq!(config.search.deadline_ms, 5_000);

    assert!(config.registry.path.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_effective_limit_clamps() {
    let search = SearchConfig::default();

    assert_eq!(search.effective_limit(None), 20);
    assert_eq!(search.effective_limit(Some(0)), 1);
    assert_eq!(search.effective_limit(Some(50)), 50);
    assert_eq!(search.effective_limit(Some(5_000)), 100);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = Config::from_toml_str(
        r#"
        [search]
        concurrency = 2
        "#,
    )
    .expect("Should parse partial config");

    assert_eq!(config.search.concurrency, 2);
    assert_eq!(config.search.default_limit, 20);
    assert_eq!(config.server.bind, "127.0.0.1:8080");
}

#[test]
fn test_invalid_toml_values_rejected() {
    let result = Config::from_toml_str(
        r#"
        [search]
        default_limit = 500
        max_limit = 100
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_config_toml_round_trip() {
    let mut config = Config::default();
    config.search.deadline_ms = 750;
    config.registry.path = Some("/etc/lineage/catalog.toml".into());

    let serialized = toml::to_string_pretty(&config).expect("Should serialize");
    let deserialized = Config::from_toml_str(&serialized).expect("Should deserialize");

    assert_eq!(deserialized.search.deadline_ms, 750);
    assert_eq!(
        deserialized.registry.path,
        Some("/etc/lineage/catalog.toml".into())
    );
}

#[test]
fn test_config_get_and_set() {
    let mut config = Config::default();

    config.set("search.concurrency", "3").unwrap();
    assert_eq!(config.get("search.concurrency").unwrap(), "3");

    config.set("server.bind", "0.0.0.0:9000").unwrap();
    assert_eq!(config.get("server.bind").unwrap(), "0.0.0.0:9000");

    assert_eq!(config.get("registry.path").unwrap(), "(built-in catalog)");
    config.set("registry.path", "/tmp/catalog.toml").unwrap();
    assert_eq!(config.get("registry.path").unwrap(), "/tmp/catalog.toml");
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::default();

    assert!(config.set("server.bind", "not-an-address").is_err());
    assert!(config.set("search.concurrency", "zero").is_err());
    assert!(config.set("search.concurrency", "0").is_err());
    assert!(config.set("unknown.key", "1").is_err());
}

#[test]
fn test_config_list_covers_all_keys() {
    let config = Config::default();
    let entries = config.list().unwrap();

    assert_eq!(entries.len(), 8);
    assert!(entries.iter().any(|(k, _)| k == "search.deadline_ms"));
}
