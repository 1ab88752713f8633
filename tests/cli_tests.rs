//! End-to-end tests for the `mattesync` binary.
//!
//! These only cover paths that end before any network traffic.

mod fixtures;

use fixtures::write_config;
use std::process::Command;
use tempfile::TempDir;

/// Path to the mattesync binary
fn mattesync_bin() -> &'static str {
    env!("CARGO_BIN_EXE_mattesync")
}

#[test]
fn test_help_lists_options() {
    let output = Command::new(mattesync_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "<HOST>",
        "--token-file",
        "--matte",
        "--portrait-matte",
        "--all",
        "--debug",
        "--dry-run",
        "--json",
        "--config",
    ] {
        assert!(stdout.contains(flag), "help should mention {flag}: {stdout}");
    }
}

#[test]
fn test_version() {
    let output = Command::new(mattesync_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_host_is_usage_error() {
    let output = Command::new(mattesync_bin())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("<HOST>"));
}

#[test]
fn test_unparseable_config_fails_before_connecting() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, "[device\nport = ");

    let output = Command::new(mattesync_bin())
        .args(["192.0.2.1", "--config", config.to_str().unwrap()])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

#[test]
fn test_invalid_config_values_fail() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, "[device]\nport = 0\n");

    let output = Command::new(mattesync_bin())
        .args(["192.0.2.1", "--config", config.to_str().unwrap()])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ports must be non-zero"));
}
