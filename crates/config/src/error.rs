//! Error types for configuration resolution.
//!
//! Responsibilities:
//! - Define error variants for the failures `Resolver::resolve` surfaces.
//! - Define error variants for loading credential files and `.env` files.
//!
//! Does NOT handle:
//! - Provider or coercer internals. Those never fail outward; problems are
//!   logged and resolve to an absent value.
//!
//! Invariants:
//! - All error variants include context for debugging (keys, paths, allowed values).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - Credential parse errors never include file contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value was absent or empty in every provider.
    #[error("Could not find value for {key} in providers: {providers}!")]
    MissingRequiredValue { key: String, providers: String },

    /// The resolved value is not a member of the allow-list.
    #[error("Config value {value} is invalid. Valid values: {allowed}")]
    InvalidEnumValue { value: String, allowed: String },

    #[error("Failed to read credential file at {path}")]
    CredentialFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse credential file at {path}: {message}")]
    CredentialFileParse { path: PathBuf, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
