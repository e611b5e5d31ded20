//! Shared helpers for container-config integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use container_config::{
    CredentialStoreProvider, DefaultValueProvider, EnvironmentProvider, Provider, Resolver,
    SecretVolumeProvider,
};
use tempfile::TempDir;

pub const RSA_KEY_PEM: &str = include_str!("../fixtures/localhost.key");
pub const CERT_PEM: &str = include_str!("../fixtures/localhost.crt");

/// A temporary secret mount laid out like `/etc/<name>-secrets/...`.
pub struct SecretMount {
    dir: TempDir,
}

impl SecretMount {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `contents` to `relative` under the mount root.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Glob matching every `*-secrets` directory under the mount root.
    pub fn pattern(&self) -> String {
        let root = glob::Pattern::escape(&self.dir.path().to_string_lossy());
        format!("{root}/*-secrets")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// The default chain with the secret volume pinned to `mount`.
pub fn resolver_with_mount(mount: &SecretMount) -> Resolver {
    let mut volume = SecretVolumeProvider::new();
    volume.set_directory(Some(mount.pattern()));
    resolver_with_volume(volume)
}

/// The default chain with `mount` as the fallback mount directory, so
/// `SECRET_MOUNT_DIRECTORY` still takes precedence.
pub fn resolver_with_default_mount(mount: &SecretMount) -> Resolver {
    resolver_with_volume(SecretVolumeProvider::new().with_default_directory(mount.pattern()))
}

fn resolver_with_volume(volume: SecretVolumeProvider) -> Resolver {
    Resolver::with_providers(vec![
        Box::new(EnvironmentProvider::new()),
        Box::new(volume),
        Box::new(DefaultValueProvider::new()),
    ])
}

/// Environment and default value only, for preset tests.
pub fn env_resolver() -> Resolver {
    let providers: Vec<Box<dyn Provider>> = vec![
        Box::new(EnvironmentProvider::new()),
        Box::new(DefaultValueProvider::new()),
    ];
    Resolver::with_providers(providers)
}

pub fn credential_store(yaml: &str) -> CredentialStoreProvider {
    CredentialStoreProvider::from_yaml_str(yaml).unwrap()
}
