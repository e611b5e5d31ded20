//! Ready-made configuration bundles built from repeated resolver lookups.
//!
//! Each preset derives its keys from a caller-supplied prefix (`CACHE`,
//! `MAILER`, ...) and returns a typed, serializable struct.

mod mailer;
mod redis;

pub use mailer::{DeliveryMethod, MailerConfig, SendmailSettings, SmtpAuthentication, SmtpSettings};
pub use redis::{RedisConfig, SentinelConfig, SslParams};

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::options::LookupOptions;
use crate::resolver::Resolver;
use crate::value::{ConfigValue, ValueType};

/// Serializes optional secrets in plain text. Presets are handed to client
/// libraries that need the raw credential.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::Serializer;

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match secret {
            Some(secret) => serializer.serialize_some(secret.expose_secret()),
            None => serializer.serialize_none(),
        }
    }
}

/// Resolve `key` and return its plain string form, or `None` when absent.
fn resolve_string(
    resolver: &Resolver,
    key: &str,
    options: &LookupOptions,
) -> Result<Option<String>, ConfigError> {
    Ok(resolver
        .resolve(key, options)?
        .map(|value| value.to_plain_string()))
}

/// Like `resolve_string`, but empty strings count as absent.
fn resolve_non_empty(
    resolver: &Resolver,
    key: &str,
    options: &LookupOptions,
) -> Result<Option<String>, ConfigError> {
    Ok(resolve_string(resolver, key, options)?.filter(|s| !s.is_empty()))
}

/// Resolve a password. Blank values become `None` so clients never send an
/// empty AUTH.
fn resolve_secret(
    resolver: &Resolver,
    key: &str,
    options: &LookupOptions,
) -> Result<Option<SecretString>, ConfigError> {
    Ok(resolve_string(resolver, key, options)?
        .filter(|s| !s.trim().is_empty())
        .map(|s| SecretString::new(s.into())))
}

fn resolve_bool(
    resolver: &Resolver,
    key: &str,
    options: &LookupOptions,
) -> Result<Option<bool>, ConfigError> {
    let options = options.clone().with_type(ValueType::Boolean);
    Ok(resolver.resolve(key, &options)?.and_then(|v| v.as_bool()))
}

/// Options for an optional typed field: absent stays absent.
fn optional(options: &LookupOptions, value_type: ValueType) -> LookupOptions {
    options
        .clone()
        .with_type(value_type)
        .with_coerce_nil(false)
}

fn symbol_name(value: Option<ConfigValue>) -> Option<String> {
    match value? {
        ConfigValue::Symbol(name) | ConfigValue::String(name) => Some(name),
        other => Some(other.to_plain_string()),
    }
}
