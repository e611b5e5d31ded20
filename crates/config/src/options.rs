//! Per-lookup options.
//!
//! Invariants:
//! - `coerce_nil` defaults to true; every other flag defaults to off.
//! - An allow-list may admit absence explicitly via `with_absent_allowed()`.

use crate::value::{ConfigValue, ValueType};

/// Options controlling a single `Resolver::resolve` call.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Fail with `MissingRequiredValue` when nothing non-empty is found.
    pub required: bool,
    /// Value returned by the default-value provider.
    pub default: Option<ConfigValue>,
    /// Overrides the secret volume mount directory for this lookup.
    pub secret_mount_directory: Option<String>,
    /// Whether to coerce an absent value (e.g. absent becomes `false` for booleans).
    pub coerce_nil: bool,
    /// Read from and write to the resolver's value cache.
    pub cache: bool,
    /// Target type for coercion.
    pub value_type: Option<ValueType>,
    /// Allowed values; `None` entries admit absence.
    pub allowed: Option<Vec<Option<ConfigValue>>>,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupOptions {
    pub fn new() -> Self {
        Self {
            required: false,
            default: None,
            secret_mount_directory: None,
            coerce_nil: true,
            cache: false,
            value_type: None,
            allowed: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: impl Into<ConfigValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_secret_mount_directory(mut self, directory: impl Into<String>) -> Self {
        self.secret_mount_directory = Some(directory.into());
        self
    }

    pub fn with_coerce_nil(mut self, coerce_nil: bool) -> Self {
        self.coerce_nil = coerce_nil;
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Restrict the resolved value to the given set.
    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ConfigValue>,
    {
        let allowed = self.allowed.get_or_insert_with(Vec::new);
        allowed.extend(values.into_iter().map(|v| Some(v.into())));
        self
    }

    /// Admit an absent value in the allow-list.
    pub fn with_absent_allowed(mut self) -> Self {
        self.allowed.get_or_insert_with(Vec::new).push(None);
        self
    }
}
