//! Outgoing mail delivery settings.
//!
//! Keys, for a prefix `P`: `P_PERFORM_DELIVERIES`, `P_PERFORM_CACHING`,
//! `P_RAISE_DELIVERY_ERRORS`, `P_DELIVERY_METHOD`, `P_SENDMAIL_*`, and
//! `P_SMTP_*`. The top-level flags ignore the caller's options; the sendmail
//! and SMTP groups apply them.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::Serialize;

use super::{optional, resolve_bool, resolve_non_empty, secret_string, symbol_name};
use crate::constants::DEFAULT_SMTP_PORT;
use crate::error::ConfigError;
use crate::options::LookupOptions;
use crate::resolver::Resolver;
use crate::value::{ConfigValue, SslVerifyMode, ValueType};

/// How mail leaves the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    Smtp,
    Sendmail,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 2] = [DeliveryMethod::Smtp, DeliveryMethod::Sendmail];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smtp => "smtp",
            Self::Sendmail => "sendmail",
        }
    }
}

impl FromStr for DeliveryMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|m| m.as_str() == s).ok_or(())
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SMTP authentication mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmtpAuthentication {
    Plain,
    Login,
    CramMd5,
}

impl SmtpAuthentication {
    pub const ALL: [SmtpAuthentication; 3] = [
        SmtpAuthentication::Plain,
        SmtpAuthentication::Login,
        SmtpAuthentication::CramMd5,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Login => "login",
            Self::CramMd5 => "cram_md5",
        }
    }
}

impl FromStr for SmtpAuthentication {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|m| m.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SendmailSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SmtpSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "secret_string::serialize"
    )]
    pub password: Option<SecretString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<SmtpAuthentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_starttls_auto: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openssl_verify_mode: Option<SslVerifyMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
}

/// Mail delivery settings.
#[derive(Debug, Clone, Serialize)]
pub struct MailerConfig {
    pub perform_deliveries: bool,
    pub perform_caching: bool,
    pub raise_delivery_errors: bool,
    pub delivery_method: DeliveryMethod,
    pub sendmail_settings: SendmailSettings,
    pub smtp_settings: SmtpSettings,
}

impl MailerConfig {
    /// Load the mailer settings for `prefix`.
    ///
    /// `production` is the default for `perform_deliveries`.
    pub fn load(
        resolver: &Resolver,
        prefix: &str,
        options: &LookupOptions,
        production: bool,
    ) -> Result<Self, ConfigError> {
        tracing::debug!(prefix, production, "Loading mailer configuration");

        let flag = |suffix: &str, default: bool| -> Result<bool, ConfigError> {
            let options = LookupOptions::new().with_default(default);
            Ok(resolve_bool(resolver, &format!("{prefix}_{suffix}"), &options)?.unwrap_or(default))
        };

        Ok(Self {
            perform_deliveries: flag("PERFORM_DELIVERIES", production)?,
            perform_caching: flag("PERFORM_CACHING", false)?,
            raise_delivery_errors: flag("RAISE_DELIVERY_ERRORS", false)?,
            delivery_method: load_delivery_method(resolver, prefix)?,
            sendmail_settings: load_sendmail_settings(resolver, prefix, options)?,
            smtp_settings: load_smtp_settings(resolver, prefix, options)?,
        })
    }
}

fn load_delivery_method(resolver: &Resolver, prefix: &str) -> Result<DeliveryMethod, ConfigError> {
    let options = LookupOptions::new()
        .with_default(ConfigValue::symbol(DeliveryMethod::Sendmail.as_str()))
        .with_type(ValueType::Symbol)
        .with_enum(DeliveryMethod::ALL.map(|m| ConfigValue::symbol(m.as_str())));

    let value = resolver.resolve(&format!("{prefix}_DELIVERY_METHOD"), &options)?;
    parse_member(value, &DeliveryMethod::ALL.map(DeliveryMethod::as_str))
        .map(|method| method.unwrap_or(DeliveryMethod::Sendmail))
}

fn load_sendmail_settings(
    resolver: &Resolver,
    prefix: &str,
    options: &LookupOptions,
) -> Result<SendmailSettings, ConfigError> {
    Ok(SendmailSettings {
        location: resolve_non_empty(resolver, &format!("{prefix}_SENDMAIL_LOCATION"), options)?,
        arguments: resolve_non_empty(resolver, &format!("{prefix}_SENDMAIL_ARGUMENTS"), options)?,
    })
}

fn load_smtp_settings(
    resolver: &Resolver,
    prefix: &str,
    options: &LookupOptions,
) -> Result<SmtpSettings, ConfigError> {
    let key = |suffix: &str| format!("{prefix}_SMTP_{suffix}");
    let flag = |suffix: &str| -> Result<Option<bool>, ConfigError> {
        let value = resolver.resolve(&key(suffix), &optional(options, ValueType::Boolean))?;
        Ok(value.and_then(|v| v.as_bool()))
    };

    // Lookups run in field order so a required failure names the first missing key.
    let address = resolve_non_empty(resolver, &key("ADDRESS"), options)?;

    let port = resolver
        .resolve(
            &key("PORT"),
            &options
                .clone()
                .with_default(DEFAULT_SMTP_PORT)
                .with_type(ValueType::Integer),
        )?
        .and_then(|v| v.as_i64());

    let domain = resolve_non_empty(resolver, &key("DOMAIN"), options)?;
    let user_name = resolve_non_empty(resolver, &key("USER_NAME"), options)?;
    let password = resolve_non_empty(resolver, &key("PASSWORD"), options)?
        .map(|s| SecretString::new(s.into()));

    let authentication_options = options
        .clone()
        .with_type(ValueType::Symbol)
        .with_absent_allowed()
        .with_enum(SmtpAuthentication::ALL.map(|m| ConfigValue::symbol(m.as_str())));
    let authentication = parse_member(
        resolver.resolve(&key("AUTHENTICATION"), &authentication_options)?,
        &SmtpAuthentication::ALL.map(SmtpAuthentication::as_str),
    )?;

    let enable_starttls_auto = flag("ENABLE_STARTTLS_AUTO")?;

    let openssl_verify_mode = resolver
        .resolve(
            &key("OPENSSL_VERIFY_MODE"),
            &optional(options, ValueType::SslVerifyMode),
        )?
        .and_then(|v| v.as_verify_mode());

    Ok(SmtpSettings {
        address,
        port,
        domain,
        user_name,
        password,
        authentication,
        enable_starttls_auto,
        openssl_verify_mode,
        ssl: flag("SSL")?,
        tls: flag("TLS")?,
    })
}

/// Map a validated symbol onto a typed enum.
///
/// The resolver has already checked membership, but a replaced coercer chain
/// can hand back an uncoerced value, so the check is repeated here.
fn parse_member<T: FromStr>(
    value: Option<ConfigValue>,
    names: &[&str],
) -> Result<Option<T>, ConfigError> {
    let Some(name) = symbol_name(value.clone()) else {
        return Ok(None);
    };

    name.parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnumValue {
            value: value.map(|v| v.inspect()).unwrap_or_default(),
            allowed: names.join(", "),
        })
}
