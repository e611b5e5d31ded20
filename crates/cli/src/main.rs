//! container-config - resolve configuration values for containerized services.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the provider chain, adding a credential file when one is given.
//! - Print resolved values and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Lookup semantics (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Diagnostics go to stderr; stdout carries only resolved values.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use container_config::{CredentialStoreProvider, Resolver, load_dotenv};
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    // Coercion warnings are shown unless RUST_LOG says otherwise
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let resolver = match &cli.credentials {
        Some(path) if !path.as_os_str().is_empty() => {
            match CredentialStoreProvider::from_file(path) {
                Ok(store) => Resolver::with_credential_store(store),
                Err(e) => {
                    eprintln!("Failed to load credentials: {}", e);
                    std::process::exit(ExitCode::GeneralError.as_i32());
                }
            }
        }
        _ => Resolver::new(),
    };

    if let Err(e) = run_command(cli, &resolver) {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
}
