//! Shared test utilities for container-config CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Point the secret volume at a directory that does not exist.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - Tests pick key names prefixed with `CC_CLI_` so host variables never match.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a hermetic `container-config` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `SECRET_MOUNT_DIRECTORY` points at a nonexistent glob so `/etc/*-secrets` is never read.
/// - `CONTAINER_CONFIG_CREDENTIALS` is cleared to ensure no leakage from the host.
pub fn config_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("container-config");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("SECRET_MOUNT_DIRECTORY", "/nonexistent/container-config-*-secrets");

    cmd.env_remove("CONTAINER_CONFIG_CREDENTIALS")
        .env_remove("RUST_LOG");

    cmd
}

/// A temporary directory laid out like `/etc/<name>-secrets/...`.
pub struct SecretMount {
    dir: TempDir,
}

impl SecretMount {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Glob matching every `*-secrets` directory under the mount root.
    pub fn pattern(&self) -> String {
        format!("{}/*-secrets", self.dir.path().display())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
