//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Turn shared lookup flags into `LookupOptions`.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Resolver construction (see `main()`).

use anyhow::Result;
use container_config::Resolver;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::get::GetRequest;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli, resolver: &Resolver) -> Result<()> {
    match cli.command {
        Commands::Get {
            key,
            dig,
            value_type,
            required,
            default,
            allowed,
            no_coerce_nil,
            lookup,
            json,
        } => {
            let request = GetRequest {
                key,
                dig,
                value_type,
                required,
                default,
                allowed,
                no_coerce_nil,
                json,
            };
            commands::get::run(resolver, &request, lookup.options())?;
        }
        Commands::Redis {
            prefix,
            required,
            lookup,
        } => {
            let options = lookup.options().with_required(required);
            commands::presets::run_redis(resolver, &prefix, &options)?;
        }
        Commands::Mailer {
            prefix,
            production,
            lookup,
        } => {
            commands::presets::run_mailer(resolver, &prefix, &lookup.options(), production)?;
        }
    }

    Ok(())
}
