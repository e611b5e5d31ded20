//! Integration tests for dotenv handling in the CLI.
//!
//! Responsibilities:
//! - Prove that `.env` values are visible to lookups.
//! - Prove that invalid `.env` files cause the CLI to fail at startup without leaking secrets.
//! - Ensure DOTENV_DISABLED=1 allows the CLI to skip a malformed `.env`.
//!
//! Invariants:
//! - Tests must explicitly clear `DOTENV_DISABLED` to enable dotenv loading.
//! - Tests use temp directories and set current_dir to isolate `.env` file effects.

mod common;

use common::config_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_dotenv_values_are_resolved() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "CC_CLI_DOTENV=from_dotenv\n").unwrap();

    config_cmd()
        .current_dir(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .env_remove("CC_CLI_DOTENV")
        .args(["get", "CC_CLI_DOTENV"])
        .assert()
        .success()
        .stdout("from_dotenv\n");
}

#[test]
fn test_invalid_dotenv_causes_cli_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    config_cmd()
        .current_dir(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .args(["get", "CC_CLI_OK"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".env"));
}

#[test]
fn test_invalid_dotenv_does_not_leak_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let secret_value = "supersecret_cli_token_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("CC_CLI_TOKEN={}\nINVALID_LINE", secret_value),
    )
    .unwrap();

    let output = config_cmd()
        .current_dir(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .args(["get", "CC_CLI_TOKEN"])
        .output()
        .expect("Failed to run command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains(secret_value),
        "Error message should NOT contain the secret value. stderr: {}",
        stderr
    );
}

#[test]
fn test_dotenv_disabled_skips_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    config_cmd()
        .current_dir(temp_dir.path())
        .env("CC_CLI_OK", "yes")
        .args(["get", "CC_CLI_OK"])
        .assert()
        .success()
        .stdout("yes\n");
}
