//! Configuration value resolution.
//!
//! Responsibilities:
//! - Walk the provider chain for a key and stop at the first value found.
//! - Enforce `required` and enum constraints, and coerce to the requested type.
//! - Cache resolved values for lookups that opt in.
//!
//! Does NOT handle:
//! - Locating values (see `provider`).
//! - Converting values (see `coercer`).
//!
//! Invariants:
//! - Cache hits return immediately, without re-checking `required` or the
//!   allow-list.
//! - An empty string counts as found for the chain but as empty for `required`.
//! - The cache is only read and written by lookups with `cache = true`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::coercer::{Coercer, coerce_value, default_coercers};
use crate::error::ConfigError;
use crate::options::LookupOptions;
use crate::provider::{CredentialStoreProvider, Provider, default_providers};
use crate::value::{ConfigValue, inspect_option};

/// Resolves configuration values through an ordered provider chain.
pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
    coercers: Vec<Box<dyn Coercer>>,
    cache: Mutex<HashMap<String, Option<ConfigValue>>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        let coercers: Vec<&str> = self.coercers.iter().map(|c| c.name()).collect();
        f.debug_struct("Resolver")
            .field("providers", &providers)
            .field("coercers", &coercers)
            .field("cached_keys", &self.lock_cache().len())
            .finish()
    }
}

impl Resolver {
    /// A resolver with the default provider and coercer chains.
    pub fn new() -> Self {
        Self::with_providers(default_providers(None))
    }

    /// A resolver whose default chain includes `store` before the default value.
    pub fn with_credential_store(store: CredentialStoreProvider) -> Self {
        Self::with_providers(default_providers(Some(store)))
    }

    /// A resolver with a custom provider chain and the default coercers.
    pub fn with_providers(providers: Vec<Box<dyn Provider>>) -> Self {
        Self {
            providers,
            coercers: default_coercers(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve `key`, deriving the dig path from the key.
    pub fn resolve(
        &self,
        key: &str,
        options: &LookupOptions,
    ) -> Result<Option<ConfigValue>, ConfigError> {
        self.resolve_at(key, &[], options)
    }

    /// Resolve `key` with an explicit dig path for structured providers.
    ///
    /// An empty `dig_path` falls back to the key lowercased and split on `_`.
    pub fn resolve_at(
        &self,
        key: &str,
        dig_path: &[&str],
        options: &LookupOptions,
    ) -> Result<Option<ConfigValue>, ConfigError> {
        tracing::debug!(key, "Loading configuration value");

        let dig_path: Vec<String> = if dig_path.is_empty() {
            default_dig_path(key)
        } else {
            dig_path.iter().map(|s| s.to_string()).collect()
        };

        if options.cache
            && let Some(cached) = self.lock_cache().get(key)
        {
            tracing::debug!(key, "Configuration value served from cache");
            return Ok(cached.clone());
        }

        let value = self.load_value(key, &dig_path, options);
        self.check_empty(key, value.as_ref(), options)?;

        let value = coerce_value(
            &self.coercers,
            value,
            options.value_type.as_ref(),
            options.coerce_nil,
        );
        check_enum(value.as_ref(), options)?;

        if options.cache {
            self.lock_cache().insert(key.to_string(), value.clone());
        }

        Ok(value)
    }

    fn load_value(
        &self,
        key: &str,
        dig_path: &[String],
        options: &LookupOptions,
    ) -> Option<ConfigValue> {
        self.providers.iter().find_map(|provider| {
            let value = provider.load(key, dig_path, options);
            if value.is_some() {
                tracing::debug!(key, provider = provider.name(), "Configuration value found");
            }
            value
        })
    }

    fn check_empty(
        &self,
        key: &str,
        value: Option<&ConfigValue>,
        options: &LookupOptions,
    ) -> Result<(), ConfigError> {
        let is_empty = value.is_none_or(|v| v.to_plain_string().is_empty());
        if !is_empty {
            tracing::debug!(key, "Configuration value loaded");
            return Ok(());
        }

        let providers = self.provider_names().join(", ");
        tracing::debug!(key, %providers, "Could not find configuration value");

        if options.required {
            return Err(ConfigError::MissingRequiredValue {
                key: key.to_string(),
                providers,
            });
        }
        Ok(())
    }

    pub fn providers(&self) -> &[Box<dyn Provider>] {
        &self.providers
    }

    pub fn providers_mut(&mut self) -> &mut Vec<Box<dyn Provider>> {
        &mut self.providers
    }

    pub fn set_providers(&mut self, providers: Vec<Box<dyn Provider>>) {
        self.providers = providers;
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn coercers(&self) -> &[Box<dyn Coercer>] {
        &self.coercers
    }

    pub fn set_coercers(&mut self, coercers: Vec<Box<dyn Coercer>>) {
        self.coercers = coercers;
    }

    /// Snapshot of the value cache.
    pub fn cache(&self) -> HashMap<String, Option<ConfigValue>> {
        self.lock_cache().clone()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, Option<ConfigValue>>> {
        // Entries are written whole, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `MY_PASSWORD` becomes `["my", "password"]`. Trailing empty segments are dropped.
fn default_dig_path(key: &str) -> Vec<String> {
    let mut segments: Vec<String> = key.to_lowercase().split('_').map(str::to_string).collect();
    while segments.last().is_some_and(String::is_empty) {
        segments.pop();
    }
    segments
}

fn check_enum(value: Option<&ConfigValue>, options: &LookupOptions) -> Result<(), ConfigError> {
    let Some(allowed) = &options.allowed else {
        return Ok(());
    };

    if allowed
        .iter()
        .any(|candidate| enum_member_matches(candidate.as_ref(), value))
    {
        return Ok(());
    }

    let valid: Vec<String> = allowed
        .iter()
        .map(|candidate| {
            candidate
                .as_ref()
                .map(ConfigValue::to_plain_string)
                .unwrap_or_default()
        })
        .collect();

    Err(ConfigError::InvalidEnumValue {
        value: inspect_option(value),
        allowed: valid.join(", "),
    })
}

/// Integers and floats compare by numeric value, so `5` matches `5.0`.
fn enum_member_matches(candidate: Option<&ConfigValue>, value: Option<&ConfigValue>) -> bool {
    match (candidate, value) {
        (Some(ConfigValue::Integer(i)), Some(ConfigValue::Float(f)))
        | (Some(ConfigValue::Float(f)), Some(ConfigValue::Integer(i))) => *i as f64 == *f,
        _ => candidate == value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DefaultValueProvider;
    use crate::value::ValueType;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed value and counts how often it is asked.
    struct FixedProvider {
        name: &'static str,
        value: Option<ConfigValue>,
        calls: Arc<AtomicUsize>,
    }

    impl FixedProvider {
        fn boxed(name: &'static str, value: Option<&str>) -> (Box<dyn Provider>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let provider = Self {
                name,
                value: value.map(ConfigValue::from),
                calls: Arc::clone(&calls),
            };
            (Box::new(provider), calls)
        }
    }

    impl Provider for FixedProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn load(&self, _key: &str, _dig: &[String], _options: &LookupOptions) -> Option<ConfigValue> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value.clone()
        }
    }

    /// Records the dig path it was called with.
    struct DigRecorder(Arc<Mutex<Vec<String>>>);

    impl Provider for DigRecorder {
        fn name(&self) -> &str {
            "Dig Recorder"
        }

        fn load(&self, _key: &str, dig: &[String], _options: &LookupOptions) -> Option<ConfigValue> {
            *self.0.lock().unwrap() = dig.to_vec();
            None
        }
    }

    #[test]
    fn test_default_chain() {
        let resolver = Resolver::new();
        assert_eq!(
            resolver.provider_names(),
            ["Environment Variable", "Secret Volume", "Default Value"]
        );
        assert_eq!(resolver.coercers().len(), 8);
    }

    #[test]
    fn test_credential_store_sits_before_default() {
        let store = CredentialStoreProvider::from_value(serde_json::json!({}));
        let resolver = Resolver::with_credential_store(store);
        assert_eq!(
            resolver.provider_names(),
            [
                "Environment Variable",
                "Secret Volume",
                "Credential Store",
                "Default Value"
            ]
        );
    }

    #[test]
    fn test_first_found_value_wins() {
        let (first, first_calls) = FixedProvider::boxed("First", None);
        let (second, second_calls) = FixedProvider::boxed("Second", Some("two"));
        let (third, third_calls) = FixedProvider::boxed("Third", Some("three"));
        let resolver = Resolver::with_providers(vec![first, second, third]);

        let value = resolver.resolve("KEY", &LookupOptions::new()).unwrap();

        assert_eq!(value, Some("two".into()));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(third_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_string_stops_the_chain() {
        let (empty, _) = FixedProvider::boxed("Empty", Some(""));
        let (later, later_calls) = FixedProvider::boxed("Later", Some("later"));
        let resolver = Resolver::with_providers(vec![empty, later]);

        assert_eq!(
            resolver.resolve("KEY", &LookupOptions::new()).unwrap(),
            Some("".into())
        );
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_required_missing_names_providers() {
        let (a, _) = FixedProvider::boxed("Alpha", None);
        let (b, _) = FixedProvider::boxed("Beta", None);
        let resolver = Resolver::with_providers(vec![a, b]);

        let err = resolver
            .resolve("MY_VAR", &LookupOptions::new().with_required(true))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Could not find value for MY_VAR in providers: Alpha, Beta!"
        );
    }

    #[test]
    fn test_required_rejects_empty_string() {
        let (empty, _) = FixedProvider::boxed("Empty", Some(""));
        let resolver = Resolver::with_providers(vec![empty]);

        let result = resolver.resolve("KEY", &LookupOptions::new().with_required(true));
        assert!(matches!(result, Err(ConfigError::MissingRequiredValue { .. })));
    }

    #[test]
    fn test_missing_optional_value_is_absent() {
        let resolver = Resolver::with_providers(vec![Box::new(DefaultValueProvider::new())]);
        assert_eq!(resolver.resolve("KEY", &LookupOptions::new()).unwrap(), None);
    }

    #[test]
    fn test_default_value_is_coerced() {
        let resolver = Resolver::with_providers(vec![Box::new(DefaultValueProvider::new())]);
        let options = LookupOptions::new()
            .with_default("42")
            .with_type(ValueType::Integer);

        assert_eq!(
            resolver.resolve("KEY", &options).unwrap(),
            Some(ConfigValue::Integer(42))
        );
    }

    #[test]
    fn test_enum_accepts_member() {
        let (provider, _) = FixedProvider::boxed("Fixed", Some("smtp"));
        let resolver = Resolver::with_providers(vec![provider]);
        let options = LookupOptions::new()
            .with_type(ValueType::Symbol)
            .with_enum([ConfigValue::symbol("smtp"), ConfigValue::symbol("sendmail")]);

        assert_eq!(
            resolver.resolve("KEY", &options).unwrap(),
            Some(ConfigValue::symbol("smtp"))
        );
    }

    #[test]
    fn test_enum_rejects_non_member() {
        let (provider, _) = FixedProvider::boxed("Fixed", Some("pigeon"));
        let resolver = Resolver::with_providers(vec![provider]);
        let options = LookupOptions::new()
            .with_type(ValueType::Symbol)
            .with_enum([ConfigValue::symbol("smtp"), ConfigValue::symbol("sendmail")]);

        let err = resolver.resolve("KEY", &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config value :pigeon is invalid. Valid values: smtp, sendmail"
        );
    }

    #[test]
    fn test_enum_compares_after_coercion() {
        let (provider, _) = FixedProvider::boxed("Fixed", Some("5"));
        let resolver = Resolver::with_providers(vec![provider]);

        let untyped = LookupOptions::new().with_enum([5]);
        assert!(resolver.resolve("KEY", &untyped).is_err());

        let typed = untyped.with_type(ValueType::Integer);
        assert_eq!(
            resolver.resolve("KEY", &typed).unwrap(),
            Some(ConfigValue::Integer(5))
        );
    }

    #[test]
    fn test_enum_compares_integers_and_floats_numerically() {
        let (provider, _) = FixedProvider::boxed("Fixed", Some("5"));
        let resolver = Resolver::with_providers(vec![provider]);

        let float_value = LookupOptions::new()
            .with_type(ValueType::Float)
            .with_enum([5, 10]);
        assert_eq!(
            resolver.resolve("KEY", &float_value).unwrap(),
            Some(ConfigValue::Float(5.0))
        );

        let integer_value = LookupOptions::new()
            .with_type(ValueType::Integer)
            .with_enum([5.0, 10.0]);
        assert_eq!(
            resolver.resolve("KEY", &integer_value).unwrap(),
            Some(ConfigValue::Integer(5))
        );

        let fractional = LookupOptions::new()
            .with_type(ValueType::Float)
            .with_enum([5.5]);
        assert!(resolver.resolve("KEY", &fractional).is_err());
    }

    #[test]
    fn test_enum_with_absent_member() {
        let (provider, _) = FixedProvider::boxed("Empty", None);
        let resolver = Resolver::with_providers(vec![provider]);
        let options = LookupOptions::new()
            .with_type(ValueType::Symbol)
            .with_absent_allowed()
            .with_enum([ConfigValue::symbol("plain")]);

        assert_eq!(resolver.resolve("KEY", &options).unwrap(), None);

        let strict = LookupOptions::new()
            .with_type(ValueType::Symbol)
            .with_enum([ConfigValue::symbol("plain")]);
        let err = resolver.resolve("KEY", &strict).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config value nil is invalid. Valid values: plain"
        );
    }

    #[test]
    fn test_cache_hit_skips_providers() {
        let (provider, calls) = FixedProvider::boxed("Fixed", Some("cached"));
        let resolver = Resolver::with_providers(vec![provider]);
        let options = LookupOptions::new().with_cache(true);

        assert_eq!(resolver.resolve("KEY", &options).unwrap(), Some("cached".into()));
        assert_eq!(resolver.resolve("KEY", &options).unwrap(), Some("cached".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.cache().get("KEY"), Some(&Some("cached".into())));
    }

    #[test]
    fn test_uncached_lookup_ignores_cache() {
        let (provider, calls) = FixedProvider::boxed("Fixed", Some("value"));
        let resolver = Resolver::with_providers(vec![provider]);

        resolver.resolve("KEY", &LookupOptions::new().with_cache(true)).unwrap();
        resolver.resolve("KEY", &LookupOptions::new()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_uncached_lookup_does_not_populate_cache() {
        let (provider, _) = FixedProvider::boxed("Fixed", Some("value"));
        let resolver = Resolver::with_providers(vec![provider]);

        resolver.resolve("KEY", &LookupOptions::new()).unwrap();
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_cache_hit_skips_validation() {
        let (provider, _) = FixedProvider::boxed("Empty", None);
        let resolver = Resolver::with_providers(vec![provider]);

        let cached = LookupOptions::new().with_cache(true);
        assert_eq!(resolver.resolve("KEY", &cached).unwrap(), None);

        let strict = cached.with_required(true).with_enum(["x"]);
        assert_eq!(resolver.resolve("KEY", &strict).unwrap(), None);
    }

    #[test]
    fn test_clear_cache() {
        let (provider, calls) = FixedProvider::boxed("Fixed", Some("value"));
        let resolver = Resolver::with_providers(vec![provider]);
        let options = LookupOptions::new().with_cache(true);

        resolver.resolve("KEY", &options).unwrap();
        resolver.clear_cache();
        assert!(resolver.cache().is_empty());

        resolver.resolve("KEY", &options).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dig_path_derived_from_key() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let resolver = Resolver::with_providers(vec![Box::new(DigRecorder(Arc::clone(&seen)))]);

        resolver.resolve("MY_PASSWORD", &LookupOptions::new()).unwrap();
        assert_eq!(*seen.lock().unwrap(), ["my", "password"]);

        resolver.resolve("TRAILING__", &LookupOptions::new()).unwrap();
        assert_eq!(*seen.lock().unwrap(), ["trailing"]);

        resolver
            .resolve_at("IGNORED", &["smtp", "password"], &LookupOptions::new())
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), ["smtp", "password"]);
    }

    #[test]
    fn test_set_providers_and_coercers() {
        let mut resolver = Resolver::new();
        let (provider, _) = FixedProvider::boxed("Only", Some("true"));
        resolver.set_providers(vec![provider]);
        resolver.set_coercers(Vec::new());

        let options = LookupOptions::new().with_type(ValueType::Boolean);
        assert_eq!(resolver.resolve("KEY", &options).unwrap(), Some("true".into()));

        resolver.providers_mut().insert(0, Box::new(DefaultValueProvider::new()));
        assert_eq!(resolver.provider_names(), ["Default Value", "Only"]);
    }

    #[test]
    fn test_resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver>();
    }
}
