//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn morph(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("morph"));
    cmd.env("HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("MORPH_CONFIG")
        .arg("--config")
        .arg(home.path().join("config.toml"));
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().expect("tmp");
    morph(&home).arg("version").assert().success().stdout(predicate::str::contains("Morph v"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("morph"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Assemble request payloads"))
        .stdout(predicate::str::contains("payload"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_build_from_options() {
    let home = TempDir::new().expect("tmp");
    let body = stdout_json(morph(&home).args([
        "payload",
        "build",
        "-O",
        "name=web",
        "-O",
        "description=",
        "-O",
        "config.visible=on",
    ]));
    assert_eq!(body, json!({"name": "web", "config": {"visible": true}}));
}

#[test]
fn test_build_merges_template_payload_and_options() {
    let home = TempDir::new().expect("tmp");
    let template = home.path().join("template.json");
    let payload = home.path().join("payload.yml");
    fs::write(&template, r#"{"name": null, "desc": "", "config": {"size": 1, "tags": ["a"]}}"#)
        .expect("write");
    fs::write(&payload, "config:\n  tags: [b]\n  enabled: 'off'\n").expect("write");

    let body = stdout_json(morph(&home).args(["payload", "build", "--wrap", "group", "-O", "name=dev"]).args([
        "--template",
        template.to_str().expect("utf8"),
        "--payload",
        payload.to_str().expect("utf8"),
    ]));
    assert_eq!(
        body,
        json!({"group": {"config": {"size": 1, "tags": ["b"], "enabled": false}, "name": "dev"}})
    );
}

#[test]
fn test_build_concat_arrays() {
    let home = TempDir::new().expect("tmp");
    let first = home.path().join("first.json");
    let second = home.path().join("second.json");
    fs::write(&first, r#"{"tags": ["a"]}"#).expect("write");
    fs::write(&second, r#"{"tags": ["b"]}"#).expect("write");

    let body = stdout_json(morph(&home).args([
        "payload",
        "build",
        "--concat-arrays",
        "-p",
        first.to_str().expect("utf8"),
        "-p",
        second.to_str().expect("utf8"),
    ]));
    assert_eq!(body, json!({"tags": ["a", "b"]}));
}

#[test]
fn test_build_require_changes_fails_on_blank_payload() {
    let home = TempDir::new().expect("tmp");
    morph(&home)
        .args(["payload", "build", "--require-changes", "-O", "name="])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Specify at least one option to update"));
}

#[test]
fn test_build_rejects_malformed_option() {
    let home = TempDir::new().expect("tmp");
    morph(&home)
        .args(["payload", "build", "-O", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use key=value"));
}

#[test]
fn test_build_honours_config_switches() {
    let home = TempDir::new().expect("tmp");
    fs::write(home.path().join("config.toml"), "[payload]\ncompact = false\nbooleanize = false\n")
        .expect("write");

    let body = stdout_json(morph(&home).args(["payload", "build", "-O", "a=", "-O", "b=on"]));
    assert_eq!(body, json!({"a": "", "b": "on"}));
}

#[test]
fn test_build_compact_json_is_single_line() {
    let home = TempDir::new().expect("tmp");
    morph(&home)
        .args(["payload", "build", "--compact-json", "-O", "name=x"])
        .assert()
        .success()
        .stdout("{\"name\":\"x\"}\n");
}

#[test]
fn test_keys_upcases_top_level() {
    let home = TempDir::new().expect("tmp");
    let file = home.path().join("row.json");
    fs::write(&file, r#"{"name": "x", "nested": {"name": "y"}}"#).expect("write");

    let body = stdout_json(morph(&home).args(["payload", "keys", "--case", "upper", file.to_str().expect("utf8")]));
    assert_eq!(body, json!({"NAME": "x", "NESTED": {"name": "y"}}));
}

#[test]
fn test_config_init_set_get() {
    let home = TempDir::new().expect("tmp");
    morph(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("config.toml").exists());

    morph(&home)
        .args(["config", "set", "general.appliance", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set general.appliance = prod"));
    morph(&home)
        .args(["config", "get", "general.appliance"])
        .assert()
        .success()
        .stdout("prod\n");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = TempDir::new().expect("tmp");
    morph(&home)
        .args(["config", "set", "nope.key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_config_set_does_not_persist_env_overrides() {
    let home = TempDir::new().expect("tmp");
    let config_path = home.path().join("config.toml");
    morph(&home).args(["config", "init"]).assert().success();

    morph(&home)
        .env("MORPH_LOGGING__LEVEL", "trace")
        .args(["config", "set", "general.appliance", "prod"])
        .assert()
        .success();

    let saved = fs::read_to_string(&config_path).expect("read config");
    assert!(!saved.contains("trace"), "env override leaked into file:\n{saved}");
    assert!(saved.contains("appliance = \"prod\""));

    morph(&home)
        .env("MORPH_LOGGING__LEVEL", "trace")
        .args(["config", "get", "logging.level"])
        .assert()
        .success()
        .stdout("trace\n");
}
