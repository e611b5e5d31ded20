//! Mounted secret file provider.
//!
//! Responsibilities:
//! - Locate a file named exactly like the key under a secret mount directory.
//! - Return the file contents verbatim.
//!
//! Invariants:
//! - Mount directory precedence: lookup option > instance override >
//!   `SECRET_MOUNT_DIRECTORY` > `DEFAULT_SECRET_MOUNT_PATTERN`.
//! - The mount directory is a glob; the key is matched literally.
//! - Only regular files are read. Glob, permission, and read errors yield `None`.
//! - A secret that is not valid UTF-8 yields `None` and a warning.

use std::path::PathBuf;

use super::Provider;
use crate::constants::{DEFAULT_SECRET_MOUNT_PATTERN, SECRET_MOUNT_DIRECTORY_VAR};
use crate::env::env_var_or_none;
use crate::options::LookupOptions;
use crate::value::ConfigValue;

/// Reads secrets mounted as files, e.g. Kubernetes secret volumes.
#[derive(Debug)]
pub struct SecretVolumeProvider {
    default_directory: String,
    directory: Option<String>,
}

impl Default for SecretVolumeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretVolumeProvider {
    pub fn new() -> Self {
        Self {
            default_directory: DEFAULT_SECRET_MOUNT_PATTERN.to_string(),
            directory: None,
        }
    }

    /// Set the instance-level mount directory override.
    pub fn set_directory(&mut self, directory: Option<String>) {
        self.directory = directory;
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    /// Replace the fallback used when nothing else names a mount directory.
    pub fn with_default_directory(mut self, directory: impl Into<String>) -> Self {
        self.default_directory = directory.into();
        self
    }

    pub fn default_directory(&self) -> &str {
        &self.default_directory
    }

    fn mount_directory(&self, options: &LookupOptions) -> String {
        options
            .secret_mount_directory
            .clone()
            .or_else(|| self.directory.clone())
            .or_else(|| env_var_or_none(SECRET_MOUNT_DIRECTORY_VAR))
            .unwrap_or_else(|| self.default_directory.clone())
    }

    fn find_secret_file(&self, key: &str, options: &LookupOptions) -> Option<PathBuf> {
        let directory = self.mount_directory(options);
        let pattern = format!(
            "{}/**/{}",
            directory.trim_end_matches('/'),
            glob::Pattern::escape(key)
        );

        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::debug!(%pattern, error = %e, "Invalid secret mount pattern");
                return None;
            }
        };

        paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable secret mount entry");
                    None
                }
            })
            .find(|path| path.is_file())
    }
}

impl Provider for SecretVolumeProvider {
    fn name(&self) -> &str {
        "Secret Volume"
    }

    fn load(&self, key: &str, _dig_path: &[String], options: &LookupOptions) -> Option<ConfigValue> {
        tracing::debug!(key, provider = self.name(), "Loading configuration value");

        let path = self.find_secret_file(key, options)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(
                    key,
                    path = %path.display(),
                    error = %e,
                    "Could not read secret file"
                );
                return None;
            }
        };

        match String::from_utf8(bytes) {
            Ok(contents) => Some(ConfigValue::String(contents)),
            Err(e) => {
                tracing::warn!(
                    key,
                    path = %path.display(),
                    error = %e,
                    "Secret file is not valid UTF-8"
                );
                None
            }
        }
    }
}
