//! CLI command implementations.

pub mod get;
pub mod presets;

use std::io::Write;

use anyhow::{Context, Result};

/// Write `output` followed by a newline to stdout.
pub(crate) fn print_output(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")
}
