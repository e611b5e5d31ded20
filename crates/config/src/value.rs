//! Resolved configuration values and the type tags used to coerce them.
//!
//! Responsibilities:
//! - Define `ConfigValue`, the untyped scalar every provider returns and every
//!   coercer produces.
//! - Define `ValueType`, the tag used to pick a coercer.
//! - Parse TLS material (X.509 certificates, RSA private keys) from PEM text.
//!
//! Does NOT handle:
//! - Reading certificate or key files (see `coercer::ssl`).
//!
//! Invariants:
//! - Absence is modelled as `Option::None`, never as a variant.
//! - Private key material never appears in `Debug`, `Display` or serialized output.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Placeholder rendered instead of private key material.
const REDACTED_KEY: &str = "[REDACTED PRIVATE KEY]";

/// A resolved configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// An atomic token, such as a delivery method name.
    Symbol(String),
    VerifyMode(SslVerifyMode),
    Certificate(SslCertificate),
    PrivateKey(SslPrivateKey),
}

impl ConfigValue {
    /// Build a symbol value.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Borrow the text of a `String` or `Symbol` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::VerifyMode(mode) => Some(mode.value()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_verify_mode(&self) -> Option<SslVerifyMode> {
        match self {
            Self::VerifyMode(mode) => Some(*mode),
            _ => None,
        }
    }

    pub fn into_certificate(self) -> Option<SslCertificate> {
        match self {
            Self::Certificate(cert) => Some(cert),
            _ => None,
        }
    }

    pub fn into_private_key(self) -> Option<SslPrivateKey> {
        match self {
            Self::PrivateKey(key) => Some(key),
            _ => None,
        }
    }

    /// The value's plain string form.
    ///
    /// Floats keep a trailing `.0` when integral and verify modes render as
    /// their numeric constant.
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::String(s) | Self::Symbol(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Float(f) => format_float(*f),
            Self::VerifyMode(mode) => mode.value().to_string(),
            Self::Certificate(cert) => cert.pem().to_string(),
            Self::PrivateKey(_) => REDACTED_KEY.to_string(),
        }
    }

    /// Human-readable rendering used in diagnostics (strings are quoted).
    pub fn inspect(&self) -> String {
        match self {
            Self::String(s) => format!("{s:?}"),
            Self::Symbol(s) => format!(":{s}"),
            other => other.to_plain_string(),
        }
    }
}

/// Render a possibly-absent value for diagnostics.
pub(crate) fn inspect_option(value: Option<&ConfigValue>) -> String {
    value.map_or_else(|| "nil".to_string(), ConfigValue::inspect)
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<SslVerifyMode> for ConfigValue {
    fn from(value: SslVerifyMode) -> Self {
        Self::VerifyMode(value)
    }
}

impl Serialize for ConfigValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(s) | Self::Symbol(s) => serializer.serialize_str(s),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::VerifyMode(mode) => mode.serialize(serializer),
            Self::Certificate(cert) => cert.serialize(serializer),
            Self::PrivateKey(key) => key.serialize(serializer),
        }
    }
}

/// Type tag used to select a coercer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    String,
    Symbol,
    SslVerifyMode,
    SslCertificate,
    SslKey,
    /// A tag with no built-in coercer, for custom coercers.
    Other(String),
}

impl ValueType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::SslVerifyMode => "ssl_verify_mode",
            Self::SslCertificate => "ssl_certificate",
            Self::SslKey => "ssl_key",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for ValueType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "string" => Self::String,
            "symbol" => Self::Symbol,
            "ssl_verify_mode" => Self::SslVerifyMode,
            "ssl_certificate" => Self::SslCertificate,
            "ssl_key" => Self::SslKey,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Peer verification modes, carrying the OpenSSL `SSL_VERIFY_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum SslVerifyMode {
    None = 0,
    Peer = 1,
    FailIfNoPeerCert = 2,
    ClientOnce = 4,
}

impl SslVerifyMode {
    /// Every mode, in declaration order.
    pub const ALL: [SslVerifyMode; 4] = [
        SslVerifyMode::None,
        SslVerifyMode::Peer,
        SslVerifyMode::FailIfNoPeerCert,
        SslVerifyMode::ClientOnce,
    ];

    /// The prefixed constant name, e.g. `VERIFY_PEER`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "VERIFY_NONE",
            Self::Peer => "VERIFY_PEER",
            Self::FailIfNoPeerCert => "VERIFY_FAIL_IF_NO_PEER_CERT",
            Self::ClientOnce => "VERIFY_CLIENT_ONCE",
        }
    }

    /// The numeric constant for this mode.
    pub const fn value(self) -> i64 {
        self as i64
    }

    /// Look up a mode by its exact prefixed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

impl Serialize for SslVerifyMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.value())
    }
}

/// Reasons PEM text could not be turned into TLS material.
#[derive(Error, Debug)]
pub enum TlsMaterialError {
    #[error("invalid PEM data: {0}")]
    Pem(#[from] std::io::Error),

    #[error("no CERTIFICATE block found")]
    NoCertificate,

    #[error("invalid X.509 certificate: {0}")]
    InvalidCertificate(String),

    #[error("no private key block found")]
    NoPrivateKey,

    #[error("invalid RSA private key: {0}")]
    InvalidPrivateKey(String),

    #[error("private key is not an RSA key")]
    NotRsa,
}

/// An X.509 certificate parsed from PEM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslCertificate {
    der: CertificateDer<'static>,
    pem: String,
}

impl SslCertificate {
    /// Parse the first certificate in a PEM document.
    pub fn from_pem(pem: &str) -> Result<Self, TlsMaterialError> {
        let der = rustls_pemfile::certs(&mut pem.as_bytes())
            .next()
            .ok_or(TlsMaterialError::NoCertificate)??;

        x509_parser::parse_x509_certificate(der.as_ref())
            .map_err(|e| TlsMaterialError::InvalidCertificate(e.to_string()))?;

        Ok(Self {
            der,
            pem: pem.to_string(),
        })
    }

    pub fn der(&self) -> &CertificateDer<'static> {
        &self.der
    }

    /// The PEM text the certificate was parsed from.
    pub fn pem(&self) -> &str {
        &self.pem
    }
}

impl Serialize for SslCertificate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.pem)
    }
}

/// An RSA private key parsed from PEM (PKCS#1 or PKCS#8).
#[derive(Clone)]
pub struct SslPrivateKey {
    der: Arc<PrivateKeyDer<'static>>,
    pem: SecretString,
}

impl SslPrivateKey {
    /// Parse the first private key in a PEM document, accepting RSA keys only.
    pub fn from_pem(pem: &str) -> Result<Self, TlsMaterialError> {
        let key = rustls_pemfile::private_key(&mut pem.as_bytes())?
            .ok_or(TlsMaterialError::NoPrivateKey)?;

        let parsed = match &key {
            PrivateKeyDer::Pkcs1(pkcs1) => RsaPrivateKey::from_pkcs1_der(pkcs1.secret_pkcs1_der())
                .map_err(|e| e.to_string()),
            PrivateKeyDer::Pkcs8(pkcs8) => RsaPrivateKey::from_pkcs8_der(pkcs8.secret_pkcs8_der())
                .map_err(|e| e.to_string()),
            _ => return Err(TlsMaterialError::NotRsa),
        };
        parsed.map_err(TlsMaterialError::InvalidPrivateKey)?;

        Ok(Self {
            der: Arc::new(key),
            pem: SecretString::new(pem.into()),
        })
    }

    pub fn der(&self) -> &PrivateKeyDer<'static> {
        &self.der
    }

    /// The PEM text the key was parsed from.
    pub fn expose_pem(&self) -> &str {
        self.pem.expose_secret()
    }
}

impl PartialEq for SslPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.der.secret_der() == other.der.secret_der()
    }
}

impl fmt::Debug for SslPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SslPrivateKey").finish_non_exhaustive()
    }
}

impl Serialize for SslPrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED_KEY)
    }
}
