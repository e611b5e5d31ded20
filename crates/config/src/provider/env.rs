//! Environment variable provider.

use super::Provider;
use crate::options::LookupOptions;
use crate::value::ConfigValue;

/// Reads the key verbatim from the process environment.
///
/// Unlike `env_var_or_none`, empty values are returned as found so the
/// resolver can tell "set but empty" apart from "unset".
#[derive(Debug, Default)]
pub struct EnvironmentProvider {
    _private: (),
}

impl EnvironmentProvider {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Provider for EnvironmentProvider {
    fn name(&self) -> &str {
        "Environment Variable"
    }

    fn load(&self, key: &str, _dig_path: &[String], _options: &LookupOptions) -> Option<ConfigValue> {
        tracing::debug!(key, provider = self.name(), "Loading configuration value");
        match std::env::var(key) {
            Ok(value) => Some(ConfigValue::String(value)),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => {
                tracing::debug!(key, error = %e, "Ignoring environment variable");
                None
            }
        }
    }
}
