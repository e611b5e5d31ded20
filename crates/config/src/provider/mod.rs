//! Configuration value providers.
//!
//! Responsibilities:
//! - Define the `Provider` trait every lookup strategy implements.
//! - Assemble the default provider chain.
//!
//! Does NOT handle:
//! - Stopping at the first hit or enforcing required values (see `resolver`).
//!
//! Invariants:
//! - Providers never fail outward: any internal problem yields `None`.
//! - The default-value provider is always last in the default chain.

mod credential;
mod default;
mod env;
mod keyring;
mod secret_volume;

pub use credential::CredentialStoreProvider;
pub use default::DefaultValueProvider;
pub use env::EnvironmentProvider;
pub use keyring::KeyringProvider;
pub use secret_volume::SecretVolumeProvider;

use crate::options::LookupOptions;
use crate::value::ConfigValue;

/// A named strategy for locating a raw configuration value.
pub trait Provider: Send + Sync {
    /// Human-readable name, listed in `MissingRequiredValue` errors.
    fn name(&self) -> &str;

    /// Look up `key`.
    ///
    /// `dig_path` is the nested path used by structured providers; it defaults
    /// to the key lowercased and split on underscores (`MY_PASSWORD` becomes
    /// `["my", "password"]`).
    fn load(&self, key: &str, dig_path: &[String], options: &LookupOptions) -> Option<ConfigValue>;
}

/// The default provider chain: environment, secret volume, the credential
/// store when one is supplied, then the default value.
pub fn default_providers(credentials: Option<CredentialStoreProvider>) -> Vec<Box<dyn Provider>> {
    let mut providers: Vec<Box<dyn Provider>> = vec![
        Box::new(EnvironmentProvider::new()),
        Box::new(SecretVolumeProvider::new()),
    ];

    if let Some(credentials) = credentials {
        providers.push(Box::new(credentials));
    }
    providers.push(Box::new(DefaultValueProvider::new()));

    providers
}
