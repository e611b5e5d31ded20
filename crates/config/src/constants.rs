//! Centralized constants for the container-config workspace.
//!
//! This module contains default values and well-known variable names used
//! across the resolver, its providers, and the presets.

// =============================================================================
// Control Variables
// =============================================================================

/// Environment variable that overrides the secret mount glob root.
pub const SECRET_MOUNT_DIRECTORY_VAR: &str = "SECRET_MOUNT_DIRECTORY";

/// Environment variable that disables `.env` loading when set to `true` or `1`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Secret Volume Defaults
// =============================================================================

/// Default glob root searched for mounted secret files.
pub const DEFAULT_SECRET_MOUNT_PATTERN: &str = "/etc/*-secrets";

// =============================================================================
// Keyring Defaults
// =============================================================================

/// Service name used for keyring lookups when none is given.
pub const DEFAULT_KEYRING_SERVICE: &str = "container-config";

// =============================================================================
// Redis Preset Defaults
// =============================================================================

/// Default Redis host.
pub const DEFAULT_REDIS_HOST: &str = "localhost";

/// Default Redis port.
pub const DEFAULT_REDIS_PORT: &str = "6379";

/// Default Redis Sentinel port.
pub const DEFAULT_SENTINEL_PORT: &str = "26379";

// =============================================================================
// Mailer Preset Defaults
// =============================================================================

/// Default SMTP port.
pub const DEFAULT_SMTP_PORT: i64 = 25;
