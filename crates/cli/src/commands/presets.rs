//! Redis and mailer preset commands.
//!
//! Both print the loaded settings as pretty JSON so they can be piped into
//! other tooling.

use anyhow::{Context, Result};
use container_config::{LookupOptions, MailerConfig, RedisConfig, Resolver};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize settings")?;
    super::print_output(&output)
}

/// Run the redis command.
pub fn run_redis(resolver: &Resolver, prefix: &str, options: &LookupOptions) -> Result<()> {
    let config = RedisConfig::load(resolver, prefix, options)
        .with_context(|| format!("Failed to load Redis settings for {prefix}"))?;
    print_json(&config)
}

/// Run the mailer command.
pub fn run_mailer(
    resolver: &Resolver,
    prefix: &str,
    options: &LookupOptions,
    production: bool,
) -> Result<()> {
    let config = MailerConfig::load(resolver, prefix, options, production)
        .with_context(|| format!("Failed to load mailer settings for {prefix}"))?;
    print_json(&config)
}
