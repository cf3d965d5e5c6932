//! CLI integration tests using assert_cmd.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the zenith binary for testing
fn zenith_cmd() -> Command {
    Command::cargo_bin("zenith").unwrap()
}

#[test]
fn test_version_output() {
    zenith_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zenith"));
}

#[test]
fn test_help_shows_all_commands() {
    zenith_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_watch_help() {
    zenith_cmd()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--max-attempts"))
        .stdout(predicate::str::contains("--hidden"));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("zenith.toml");

    zenith_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[[targets]]"));
}

#[test]
fn test_config_init_with_targets_then_check() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("zenith.toml");
    let target = common::closed_port_target("offline-model");

    zenith_cmd()
        .args([
            "config",
            "init",
            "-o",
            config_path.to_str().unwrap(),
            "--target",
            &format!("{}={}", target.key, target.probe_url),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 target(s)"))
        .stdout(predicate::str::contains("zenith check -c"));

    zenith_cmd()
        .args(["check", "--json", "-c", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline-model"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("zenith.toml");
    std::fs::write(&config_path, "existing").unwrap();

    zenith_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_check_reports_unreachable_targets() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("zenith.toml");
    let target = common::closed_port_target("offline-model");
    std::fs::write(
        &config_path,
        format!(
            "[[targets]]\nkey = \"{}\"\nprobe_url = \"{}\"\n",
            target.key, target.probe_url
        ),
    )
    .unwrap();

    zenith_cmd()
        .args(["check", "--json", "-t", "500", "-c", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"offline-model\""))
        .stdout(predicate::str::contains("\"online\": 0"));
}

#[test]
fn test_check_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("zenith.toml");
    std::fs::write(&config_path, "[polling]\nmax_attempts = 0\n").unwrap();

    zenith_cmd()
        .args(["check", "-c", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("polling.max_attempts"));
}

#[test]
fn test_completions_bash() {
    zenith_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zenith"));
}
