//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use container_config::ConfigError;

/// Structured exit codes for container-config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unreadable credential file, bad `.env`, output failure.
    GeneralError = 1,

    /// A required value was not found in any provider.
    ///
    /// Scripts should supply the value (environment, secret mount, or credentials).
    MissingRequiredValue = 2,

    /// The resolved value is outside the allowed set.
    ///
    /// Scripts should fix the value and not retry.
    InvalidEnumValue = 3,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingRequiredValue { .. } => ExitCode::MissingRequiredValue,
            ConfigError::InvalidEnumValue { .. } => ExitCode::InvalidEnumValue,
            ConfigError::CredentialFileRead { .. }
            | ConfigError::CredentialFileParse { .. }
            | ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}
