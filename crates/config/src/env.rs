//! Environment helpers for control variables and `.env` loading.
//!
//! Responsibilities:
//! - Read control variables (such as `SECRET_MOUNT_DIRECTORY`) with
//!   empty/whitespace filtering.
//! - Load a `.env` file into the process environment on request.
//!
//! Does NOT handle:
//! - Resolving configuration keys (see `provider::env`, which returns
//!   empty values verbatim).
//!
//! Invariants:
//! - Empty or whitespace-only control variables are treated as unset.
//! - `load_dotenv()` must be called explicitly; `DOTENV_DISABLED` is checked first.

use crate::constants::DOTENV_DISABLED_VAR;
use crate::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Load environment variables from a `.env` file if present.
///
/// If `DOTENV_DISABLED` is set to "true" or "1" the file is not loaded.
/// Missing `.env` files are silently ignored.
///
/// # Errors
///
/// - `ConfigError::DotenvParse` if the file has invalid syntax.
/// - `ConfigError::DotenvIo` if the file exists but cannot be read.
///
/// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        tracing::debug!("Skipping .env loading because {DOTENV_DISABLED_VAR} is set");
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}
