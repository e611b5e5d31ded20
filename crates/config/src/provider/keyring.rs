//! System keyring provider.
//!
//! Not part of the default chain; add it with `Resolver::set_providers` or
//! `Resolver::providers_mut`.

use super::Provider;
use crate::constants::DEFAULT_KEYRING_SERVICE;
use crate::options::LookupOptions;
use crate::value::ConfigValue;

/// Reads the key as an account name under a keyring service.
#[derive(Debug, Clone)]
pub struct KeyringProvider {
    service: String,
}

impl Default for KeyringProvider {
    fn default() -> Self {
        Self::new(DEFAULT_KEYRING_SERVICE)
    }
}

impl KeyringProvider {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn read(&self, key: &str) -> Result<String, ::keyring::Error> {
        ::keyring::Entry::new(&self.service, key)?.get_password()
    }
}

impl Provider for KeyringProvider {
    fn name(&self) -> &str {
        "System Keyring"
    }

    fn load(&self, key: &str, _dig_path: &[String], _options: &LookupOptions) -> Option<ConfigValue> {
        tracing::debug!(key, provider = self.name(), service = %self.service, "Loading configuration value");
        match self.read(key) {
            Ok(secret) => Some(ConfigValue::String(secret)),
            Err(::keyring::Error::NoEntry) => None,
            Err(e) => {
                tracing::debug!(key, service = %self.service, error = %e, "Keyring lookup failed");
                None
            }
        }
    }
}
