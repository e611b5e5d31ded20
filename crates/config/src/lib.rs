//! Configuration value resolution for containerized applications.
//!
//! A [`Resolver`] looks a key up through an ordered chain of providers
//! (environment variables, mounted secret files, an optional credential store,
//! and a default value), coerces the result to a requested type, and
//! optionally validates it against an allow-list and caches it.
//!
//! ```no_run
//! use container_config::{LookupOptions, Resolver, ValueType};
//!
//! let resolver = Resolver::new();
//! let port = resolver.resolve(
//!     "APP_PORT",
//!     &LookupOptions::new().with_default(8080).with_type(ValueType::Integer),
//! )?;
//! # Ok::<(), container_config::ConfigError>(())
//! ```

pub mod coercer;
pub mod constants;
pub mod env;
pub mod error;
pub mod options;
pub mod presets;
pub mod provider;
mod resolver;
pub mod value;

pub use coercer::{Coercer, coerce_value, default_coercers};
pub use env::{env_var_or_none, load_dotenv};
pub use error::ConfigError;
pub use options::LookupOptions;
pub use presets::{MailerConfig, RedisConfig};
pub use provider::{
    CredentialStoreProvider, DefaultValueProvider, EnvironmentProvider, KeyringProvider,
    Provider, SecretVolumeProvider, default_providers,
};
pub use resolver::Resolver;
pub use value::{ConfigValue, SslCertificate, SslPrivateKey, SslVerifyMode, ValueType};
