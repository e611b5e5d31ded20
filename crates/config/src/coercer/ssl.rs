//! TLS-related coercion: verify modes, certificates, and RSA private keys.
//!
//! Certificate and key inputs are file paths. A missing or unparsable file
//! logs a warning and yields `None`; the resolver never fails on bad TLS
//! material.

use std::path::Path;

use super::Coercer;
use crate::value::{
    ConfigValue, SslCertificate, SslPrivateKey, SslVerifyMode, TlsMaterialError, ValueType,
};

/// Coerces `VERIFY_*` constant names into verify modes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SslVerifyModeCoercer;

impl Coercer for SslVerifyModeCoercer {
    fn name(&self) -> &str {
        "SSL Verification Mode"
    }

    fn value_type(&self) -> ValueType {
        ValueType::SslVerifyMode
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        let name = value.map(|v| v.to_plain_string()).unwrap_or_default();

        if let Some(mode) = SslVerifyMode::from_name(&name) {
            return Some(ConfigValue::VerifyMode(mode));
        }

        let valid: Vec<&str> = SslVerifyMode::ALL.iter().map(|m| m.name()).collect();
        tracing::warn!(
            "Could not convert {name:?} into a valid OpenSSL verification mode.\nValid modes: {}",
            valid.join(", ")
        );
        None
    }
}

/// Loads an X.509 certificate from a PEM file path.
#[derive(Debug, Default, Clone, Copy)]
pub struct SslCertificateCoercer;

impl Coercer for SslCertificateCoercer {
    fn name(&self) -> &str {
        "SSL Certificate"
    }

    fn value_type(&self) -> ValueType {
        ValueType::SslCertificate
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        match value? {
            cert @ ConfigValue::Certificate(_) => Some(cert),
            other => load_pem("certificate", &other.to_plain_string(), SslCertificate::from_pem)
                .map(ConfigValue::Certificate),
        }
    }
}

/// Loads an RSA private key from a PEM file path.
#[derive(Debug, Default, Clone, Copy)]
pub struct SslKeyCoercer;

impl Coercer for SslKeyCoercer {
    fn name(&self) -> &str {
        "SSL Private Key"
    }

    fn value_type(&self) -> ValueType {
        ValueType::SslKey
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        match value? {
            key @ ConfigValue::PrivateKey(_) => Some(key),
            other => load_pem("key", &other.to_plain_string(), SslPrivateKey::from_pem)
                .map(ConfigValue::PrivateKey),
        }
    }
}

fn load_pem<T>(
    kind: &str,
    path: &str,
    parse: impl FnOnce(&str) -> Result<T, TlsMaterialError>,
) -> Option<T> {
    if !Path::new(path).exists() {
        tracing::warn!("Could not find SSL {kind} at {path}");
        return None;
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|pem| parse(&pem).map_err(|e| e.to_string()));

    match parsed {
        Ok(material) => Some(material),
        Err(e) => {
            tracing::warn!("Could not parse SSL {kind} {path} successfully: {e}");
            None
        }
    }
}
