//! Structured credential store provider.
//!
//! Responsibilities:
//! - Hold a nested credential tree supplied by the host application or read
//!   from a YAML/JSON file.
//! - Walk the dig path through the tree and convert scalar leaves to values.
//!
//! Does NOT handle:
//! - Decrypting credential files; the tree is supplied in plain form.
//!
//! Invariants:
//! - Missing segments, nulls, and non-scalar leaves yield `None`.
//! - File contents never appear in error messages.

use std::path::Path;

use serde_json::Value;

use super::Provider;
use crate::error::ConfigError;
use crate::options::LookupOptions;
use crate::value::ConfigValue;

/// Looks values up by dig path in a nested credential tree.
#[derive(Debug, Clone)]
pub struct CredentialStoreProvider {
    tree: Value,
}

impl CredentialStoreProvider {
    /// Wrap an already-parsed credential tree.
    pub fn from_value(tree: Value) -> Self {
        Self { tree }
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        Ok(Self::from_value(serde_yaml::from_str(source)?))
    }

    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_value(serde_json::from_str(source)?))
    }

    /// Read a credential file. `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::CredentialFileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json_str(&source).map_err(|e| e.to_string())
        } else {
            Self::from_yaml_str(&source).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::CredentialFileParse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    fn dig(&self, dig_path: &[String]) -> Option<&Value> {
        dig_path
            .iter()
            .try_fold(&self.tree, |node, segment| node.as_object()?.get(segment))
    }
}

fn scalar_value(node: &Value) -> Option<ConfigValue> {
    match node {
        Value::String(s) => Some(ConfigValue::String(s.clone())),
        Value::Bool(b) => Some(ConfigValue::Boolean(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(ConfigValue::Integer)
            .or_else(|| n.as_f64().map(ConfigValue::Float)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl Provider for CredentialStoreProvider {
    fn name(&self) -> &str {
        "Credential Store"
    }

    fn load(&self, key: &str, dig_path: &[String], _options: &LookupOptions) -> Option<ConfigValue> {
        tracing::debug!(key, provider = self.name(), dig_path = ?dig_path, "Loading configuration value");

        let Some(node) = self.dig(dig_path) else {
            tracing::debug!(key, dig_path = ?dig_path, "No credential at dig path");
            return None;
        };

        let value = scalar_value(node);
        if value.is_none() && !node.is_null() {
            tracing::debug!(key, dig_path = ?dig_path, "Credential at dig path is not a scalar");
        }
        value
    }
}
