//! Single-value lookup.
//!
//! Responsibilities:
//! - Build `LookupOptions` from the `get` flags.
//! - Resolve one key and render it as plain text or JSON.
//!
//! Does NOT handle:
//! - Provider chain construction (see `main`).
//!
//! Invariants:
//! - Allowed values are coerced to the requested type before comparison.
//! - An absent value prints nothing unless `--json` is set.

use anyhow::{Context, Result};
use container_config::{
    Coercer, ConfigValue, LookupOptions, Resolver, ValueType, coerce_value,
};
use tracing::debug;

/// Flags for a single `get` invocation.
#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub key: String,
    pub dig: Vec<String>,
    pub value_type: Option<ValueType>,
    pub required: bool,
    pub default: Option<String>,
    pub allowed: Vec<String>,
    pub no_coerce_nil: bool,
    pub json: bool,
}

impl GetRequest {
    /// Translate the flags into lookup options on top of `base`.
    pub fn options(&self, base: LookupOptions, coercers: &[Box<dyn Coercer>]) -> LookupOptions {
        let mut options = base
            .with_required(self.required)
            .with_coerce_nil(!self.no_coerce_nil);

        if let Some(default) = &self.default {
            options = options.with_default(default.as_str());
        }
        if let Some(value_type) = &self.value_type {
            options = options.with_type(value_type.clone());
        }
        if !self.allowed.is_empty() {
            let allowed: Vec<ConfigValue> = self
                .allowed
                .iter()
                .filter_map(|v| {
                    coerce_value(
                        coercers,
                        Some(v.as_str().into()),
                        self.value_type.as_ref(),
                        true,
                    )
                })
                .collect();
            options = options.with_enum(allowed);
        }
        options
    }
}

/// Render a resolved value for output, or `None` when nothing should print.
pub fn render(value: Option<&ConfigValue>, json: bool) -> Result<Option<String>> {
    if json {
        return serde_json::to_string(&value)
            .map(Some)
            .context("Failed to serialize value");
    }
    Ok(value.map(ConfigValue::to_plain_string))
}

/// Run the get command.
pub fn run(resolver: &Resolver, request: &GetRequest, base: LookupOptions) -> Result<()> {
    let options = request.options(base, resolver.coercers());
    let dig: Vec<&str> = request.dig.iter().map(String::as_str).collect();

    let value = resolver
        .resolve_at(&request.key, &dig, &options)
        .with_context(|| format!("Failed to resolve {}", request.key))?;
    debug!(key = %request.key, found = value.is_some(), "Resolved value");

    if let Some(output) = render(value.as_ref(), request.json)? {
        super::print_output(&output)?;
    }
    Ok(())
}
