//! CLI integration tests for lineage
//!
//! Tests the lineage CLI commands end-to-end using assert_cmd. Every test
//! gets its own config directory and database file.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command isolated inside `dir`
#[allow(deprecated)]
fn lineage_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lineage").unwrap();
    cmd.env("LINEAGE_CONFIG_DIR", dir.path().join("config"));
    cmd.env("LINEAGE_DATABASE", dir.path().join("lineage.db"));
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("related"))
        .stdout(predicate::str::contains("settings"));
}

#[test]
fn test_collections_lists_builtin_catalog() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .arg("collections")
        .assert()
        .success()
        .stdout(predicate::str::contains("slave-manifests"))
        .stdout(predicate::str::contains("30 collection(s)"));
}

#[test]
fn test_short_query_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .args(["search", "w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Query too short"));
}

#[test]
fn test_search_reports_unsearchable_collections() {
    let dir = TempDir::new().unwrap();

    // A fresh database has no record tables, so every collection fails
    lineage_cmd(&dir)
        .args(["--format", "json", "search", "william"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"errors\""))
        .stdout(predicate::str::contains("\"total\": 0"));
}

#[test]
fn test_related_unknown_collection_fails_with_hint() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .args(["related", "plantation-ledgers", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plantation-ledgers"))
        .stderr(predicate::str::contains("lineage collections"));
}

#[test]
fn test_settings_show_set_reset() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_auto_results = 10"))
        .stdout(predicate::str::contains("defaults"));

    lineage_cmd(&dir)
        .args(["settings", "set", "max_auto_results", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set max_auto_results = 5"));

    lineage_cmd(&dir)
        .args(["--format", "json", "settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maxAutoResults\": 5"));

    lineage_cmd(&dir)
        .args(["settings", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to defaults"));
}

#[test]
fn test_settings_reject_out_of_range() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .args(["settings", "set", "max_auto_results", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_auto_results"));
}

#[test]
fn test_config_set_get_reset() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .args(["config", "set", "search.default_limit", "50"])
        .assert()
        .success();

    lineage_cmd(&dir)
        .args(["config", "get", "search.default_limit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50"));

    lineage_cmd(&dir)
        .args(["config", "reset"])
        .assert()
        .success();

    lineage_cmd(&dir)
        .args(["config", "get", "search.default_limit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20"));
}

#[test]
fn test_config_path_uses_config_dir() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_doctor_passes_on_fresh_install() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Database: Connected"))
        .stdout(predicate::str::contains("All checks passed!"));
}

#[test]
fn test_doctor_reports_unloaded_archive_without_migrating() {
    let dir = TempDir::new().unwrap();

    lineage_cmd(&dir)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("[--] Database: Migrations pending (v0 -> v1)"))
        .stdout(predicate::str::contains("[--] Archive tables: 30 of 30 not loaded"));

    // Still unmigrated: doctor never writes the schema
    lineage_cmd(&dir)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrations pending"));
}
