//! CLI tests for hostinv.
//!
//! Each test runs in its own temp directory with the filter variables
//! cleared, so the default `hosts_data.xlsx` lookup and `.env` loading are
//! isolated from the developer environment.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hosts_data.xlsx");
    std::fs::copy(fixture, dir.path().join("hosts_data.xlsx")).unwrap();
    dir
}

fn hostinv(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("hostinv");
    cmd.current_dir(dir.path())
        .env_remove("SERVER_ENVIRONMENT")
        .env_remove("SERVER_TYPE")
        .env_remove("HOSTINV_SOURCE")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
    let dir = TempDir::new().unwrap();
    hostinv(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("SERVER_ENVIRONMENT"));
}

#[test]
fn version_flag_works() {
    let dir = TempDir::new().unwrap();
    hostinv(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostinv"));
}

// =============================================================================
// --list
// =============================================================================

#[test]
fn default_source_and_list() {
    let dir = workspace();

    let without_flag = stdout_json(&mut hostinv(&dir));
    let with_flag = stdout_json(hostinv(&dir).arg("--list"));

    assert_eq!(without_flag, with_flag);
    assert_eq!(without_flag["Production"]["hosts"], json!(["db1", "web1"]));
    assert_eq!(without_flag["_meta"]["hostvars"]["web2"]["notes"], json!(["frontend"]));
}

#[test]
fn output_is_pretty_printed() {
    let dir = workspace();
    hostinv(&dir)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"_meta\": {\n    \"hostvars\": {"));
}

#[test]
fn filter_from_environment_variables() {
    let dir = workspace();

    let value = stdout_json(
        hostinv(&dir)
            .env("SERVER_ENVIRONMENT", "Production")
            .env("SERVER_TYPE", "Database"),
    );

    assert_eq!(
        value,
        json!({
            "_meta": {
                "hostvars": {
                    "db1": {
                        "ansible_host": "db1",
                        "notes": ["backup", "legacy"],
                        "server_environment": "Production",
                        "server_type": "Database",
                        "ansible_user": "svc"
                    }
                }
            },
            "Production": { "hosts": ["db1"] },
            "Database": { "hosts": ["db1"] }
        })
    );
}

#[test]
fn flags_override_environment_variables() {
    let dir = workspace();

    let value = stdout_json(
        hostinv(&dir)
            .env("SERVER_ENVIRONMENT", "Production")
            .args(["--environment", "Staging", "--type", "Cache"]),
    );

    assert_eq!(value["Staging"]["hosts"], json!(["cache1"]));
    assert!(value.get("Production").is_none());
}

#[test]
fn zero_match_filter_prints_only_meta() {
    let dir = workspace();
    let value = stdout_json(hostinv(&dir).env("SERVER_TYPE", "Mainframe"));
    assert_eq!(value, json!({ "_meta": { "hostvars": {} } }));
}

#[test]
fn empty_filter_value_matches_nothing() {
    let dir = workspace();
    let value = stdout_json(hostinv(&dir).env("SERVER_TYPE", ""));
    assert_eq!(value, json!({ "_meta": { "hostvars": {} } }));
}

#[test]
fn dotenv_file_sets_filter() {
    let dir = workspace();
    std::fs::write(dir.path().join(".env"), "SERVER_TYPE=Cache\n").unwrap();

    let value = stdout_json(&mut hostinv(&dir));
    assert_eq!(value["Cache"]["hosts"], json!(["cache1"]));
    assert!(value.get("Web").is_none());
}

#[test]
fn output_file() {
    let dir = workspace();
    hostinv(&dir)
        .args(["--output", "inventory.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(dir.path().join("inventory.json")).unwrap();
    let value: Value = serde_json::from_str(&written).unwrap();
    assert!(value["_meta"]["hostvars"].get("db1").is_some());
}

// =============================================================================
// --host
// =============================================================================

#[test]
fn host_prints_hostvars() {
    let dir = workspace();
    let value = stdout_json(hostinv(&dir).args(["--host", "web1"]));

    assert_eq!(value["ansible_user"], "deploy");
    assert_eq!(value["notes"], json!([]));
}

#[test]
fn unknown_host_prints_empty_object() {
    let dir = workspace();
    let value = stdout_json(hostinv(&dir).args(["--host", "ghost"]));
    assert_eq!(value, json!({}));
}

#[test]
fn list_and_host_conflict() {
    let dir = workspace();
    hostinv(&dir)
        .args(["--list", "--host", "db1"])
        .assert()
        .failure();
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_source_fails_without_output() {
    let dir = TempDir::new().unwrap();
    hostinv(&dir)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("hosts_data.xlsx"));
}

#[test]
fn missing_column_fails_without_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("hosts.csv"), "Host Name,Notes\nweb1,\n").unwrap();

    hostinv(&dir)
        .arg("hosts.csv")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing required column(s)"));
}

#[test]
fn missing_field_fails_without_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("hosts.csv"),
        "Host Name,Server Environment,Server Type,Ansible User,Notes\nweb1,Production,Web,,\n",
    )
    .unwrap();

    hostinv(&dir)
        .arg("hosts.csv")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Ansible User"));
}

#[test]
fn source_from_environment_variable() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("registry.csv"),
        "Host Name,Server Environment,Server Type,Ansible User,Notes\nlb1,Production,Proxy,ops,\n",
    )
    .unwrap();

    let value = stdout_json(hostinv(&dir).env("HOSTINV_SOURCE", "registry.csv"));
    assert_eq!(value["Proxy"]["hosts"], json!(["lb1"]));
}
