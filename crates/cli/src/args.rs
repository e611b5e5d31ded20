//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate lookup flags into `LookupOptions`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use container_config::{LookupOptions, ValueType};

#[derive(Parser)]
#[command(name = "container-config")]
#[command(
    about = "Resolve configuration values from the environment, mounted secrets, and credential files",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  container-config get DATABASE_URL --required\n  container-config get WORKERS --type integer --default 4\n  container-config get DELIVERY_METHOD --type symbol --enum smtp --enum sendmail\n  container-config --credentials credentials.yml get SMTP_PASSWORD\n  container-config redis CACHE\n  container-config mailer MAILER --production\n"
)]
pub struct Cli {
    /// YAML or JSON credential file consulted after mounted secrets
    #[arg(long, global = true, env = "CONTAINER_CONFIG_CREDENTIALS", value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a single configuration value
    Get {
        /// Configuration key (e.g. DATABASE_PASSWORD)
        key: String,

        /// Path into the credential file; defaults to the key lowercased and split on '_'
        dig: Vec<String>,

        /// Coerce to a type: boolean, integer, float, string, symbol,
        /// ssl_verify_mode, ssl_certificate, ssl_key
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        value_type: Option<ValueType>,

        /// Fail if no provider has a non-empty value
        #[arg(short, long)]
        required: bool,

        /// Value used when no other provider has one
        #[arg(short, long, allow_hyphen_values = true)]
        default: Option<String>,

        /// Allowed value (repeatable)
        #[arg(short, long = "enum", value_name = "VALUE")]
        allowed: Vec<String>,

        /// Leave an absent value absent instead of coercing it
        #[arg(long)]
        no_coerce_nil: bool,

        #[command(flatten)]
        lookup: LookupArgs,

        /// Print the value as JSON (`null` when absent)
        #[arg(long)]
        json: bool,
    },

    /// Print Redis connection settings for a key prefix as JSON
    Redis {
        /// Key prefix (e.g. CACHE reads CACHE_HOST, CACHE_PORT, ...)
        prefix: String,

        /// Fail if a setting without a default is missing
        #[arg(short, long)]
        required: bool,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Print mail delivery settings for a key prefix as JSON
    Mailer {
        /// Key prefix (e.g. MAILER reads MAILER_DELIVERY_METHOD, ...)
        prefix: String,

        /// Deliver mail by default
        #[arg(long)]
        production: bool,

        #[command(flatten)]
        lookup: LookupArgs,
    },
}

/// Lookup flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct LookupArgs {
    /// Glob of directories searched for secret files (e.g. '/etc/*-secrets')
    #[arg(long, value_name = "DIR")]
    pub secret_mount_directory: Option<String>,
}

impl LookupArgs {
    pub fn options(&self) -> LookupOptions {
        let options = LookupOptions::new();
        match &self.secret_mount_directory {
            Some(dir) if !dir.trim().is_empty() => options.with_secret_mount_directory(dir.clone()),
            _ => options,
        }
    }
}
