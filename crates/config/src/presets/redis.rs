//! Redis connection settings.
//!
//! Keys, for a prefix `P`:
//! - `P_HOST` (default `localhost`), `P_PORT` (default `6379`), and `P_URL`
//!   (default `redis://{host}:{port}`).
//! - `P_PASSWORD`, `P_DB`, `P_SSL`.
//! - `P_SSL_CA_FILE`, `P_SSL_CA_PATH`, `P_SSL_CERT`, `P_SSL_KEY`, `P_SSL_VERIFY_MODE`.
//! - `P_SENTINELS` (comma-separated hosts), `P_SENTINEL_PORT` (default
//!   `26379`), `P_SENTINEL_PASSWORD`, and SSL params under `P_SENTINEL_SSL_*`.

use secrecy::SecretString;
use serde::Serialize;

use super::{optional, resolve_bool, resolve_secret, resolve_string, secret_string};
use crate::constants::{DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT, DEFAULT_SENTINEL_PORT};
use crate::error::ConfigError;
use crate::options::LookupOptions;
use crate::resolver::Resolver;
use crate::value::{ConfigValue, SslCertificate, SslPrivateKey, SslVerifyMode, ValueType};

/// TLS parameters for a Redis or Sentinel connection. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SslParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<SslCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<SslPrivateKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_mode: Option<SslVerifyMode>,
}

impl SslParams {
    /// Load `{prefix}_SSL_*` settings.
    pub fn load(
        resolver: &Resolver,
        prefix: &str,
        options: &LookupOptions,
    ) -> Result<Self, ConfigError> {
        let ca_file = resolve_string(resolver, &format!("{prefix}_SSL_CA_FILE"), options)?;
        let ca_path = resolve_string(resolver, &format!("{prefix}_SSL_CA_PATH"), options)?;
        let cert = resolver
            .resolve(
                &format!("{prefix}_SSL_CERT"),
                &optional(options, ValueType::SslCertificate),
            )?
            .and_then(ConfigValue::into_certificate);
        let key = resolver
            .resolve(
                &format!("{prefix}_SSL_KEY"),
                &optional(options, ValueType::SslKey),
            )?
            .and_then(ConfigValue::into_private_key);
        let verify_mode = resolver
            .resolve(
                &format!("{prefix}_SSL_VERIFY_MODE"),
                &optional(options, ValueType::SslVerifyMode),
            )?
            .and_then(|v| v.as_verify_mode());

        Ok(Self {
            ca_file,
            ca_path,
            cert,
            key,
            verify_mode,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One Redis Sentinel node.
#[derive(Debug, Clone, Serialize)]
pub struct SentinelConfig {
    pub host: String,
    pub port: String,
    #[serde(with = "secret_string")]
    pub password: Option<SecretString>,
    pub ssl_params: SslParams,
}

/// Redis client settings.
#[derive(Debug, Clone, Serialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(with = "secret_string")]
    pub password: Option<SecretString>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sentinels: Vec<SentinelConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<i64>,
    pub ssl: bool,
    pub ssl_params: SslParams,
}

impl RedisConfig {
    /// Load the Redis settings for `prefix`.
    ///
    /// `options` apply to every lookup; per-key defaults and types override them.
    pub fn load(
        resolver: &Resolver,
        prefix: &str,
        options: &LookupOptions,
    ) -> Result<Self, ConfigError> {
        tracing::debug!(prefix, "Loading Redis configuration");

        let host = resolve_string(
            resolver,
            &format!("{prefix}_HOST"),
            &options.clone().with_default(DEFAULT_REDIS_HOST),
        )?
        .unwrap_or_default();
        let port = resolve_string(
            resolver,
            &format!("{prefix}_PORT"),
            &options.clone().with_default(DEFAULT_REDIS_PORT),
        )?
        .unwrap_or_default();
        let url = resolve_string(
            resolver,
            &format!("{prefix}_URL"),
            &options.clone().with_default(format!("redis://{host}:{port}")),
        )?
        .unwrap_or_default();

        let sentinels = load_sentinels(resolver, prefix, options)?;
        let password = resolve_secret(resolver, &format!("{prefix}_PASSWORD"), options)?;

        let db = resolver
            .resolve(
                &format!("{prefix}_DB"),
                &optional(options, ValueType::Integer).with_required(false),
            )?
            .and_then(|v| v.as_i64());

        let ssl = resolve_bool(
            resolver,
            &format!("{prefix}_SSL"),
            &options.clone().with_default(false),
        )?
        .unwrap_or(false);
        let ssl_params = SslParams::load(resolver, prefix, options)?;

        Ok(Self {
            url,
            password,
            sentinels,
            db,
            ssl,
            ssl_params,
        })
    }
}

fn load_sentinels(
    resolver: &Resolver,
    prefix: &str,
    options: &LookupOptions,
) -> Result<Vec<SentinelConfig>, ConfigError> {
    let hosts: Vec<String> = resolve_string(
        resolver,
        &format!("{prefix}_SENTINELS"),
        &options.clone().with_required(false),
    )?
    .map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default();

    let port = resolve_string(
        resolver,
        &format!("{prefix}_SENTINEL_PORT"),
        &options.clone().with_default(DEFAULT_SENTINEL_PORT),
    )?
    .unwrap_or_default();
    let password = resolve_secret(resolver, &format!("{prefix}_SENTINEL_PASSWORD"), options)?;
    let ssl_params = SslParams::load(resolver, &format!("{prefix}_SENTINEL"), options)?;

    Ok(hosts
        .into_iter()
        .map(|host| SentinelConfig {
            host,
            port: port.clone(),
            password: password.clone(),
            ssl_params: ssl_params.clone(),
        })
        .collect())
}
