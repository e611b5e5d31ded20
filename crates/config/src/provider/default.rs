//! Default value provider.

use super::Provider;
use crate::options::LookupOptions;
use crate::value::ConfigValue;

/// Returns `options.default`; placed last so it only fires when nothing else resolved.
#[derive(Debug, Default)]
pub struct DefaultValueProvider {
    _private: (),
}

impl DefaultValueProvider {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Provider for DefaultValueProvider {
    fn name(&self) -> &str {
        "Default Value"
    }

    fn load(&self, key: &str, _dig_path: &[String], options: &LookupOptions) -> Option<ConfigValue> {
        tracing::debug!(key, provider = self.name(), "Loading configuration value");
        options.default.clone()
    }
}
