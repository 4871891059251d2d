//! Diagnostic logging setup.
//!
//! Log lines go to standard error so they never interleave with reporter
//! output on standard output.

use std::io::IsTerminal;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing::Level;

/// Environment variable that enables debug logging without `--debug`.
pub const DEBUG_ENV: &str = "MUTANT_DEBUG";

static INSTALLED: OnceLock<Level> = OnceLock::new();

/// Returns the log level for the given `--debug` setting.
///
/// `DEBUG` when `debug` is set or [`DEBUG_ENV`] is present, `WARN` otherwise.
#[must_use]
pub fn level(debug: bool) -> Level {
    if debug || std::env::var_os(DEBUG_ENV).is_some() {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Installs the global `tracing` subscriber.
///
/// Only the first call installs anything; later calls are no-ops.
///
/// # Errors
///
/// Returns an error if another global subscriber was already installed.
pub fn init(debug: bool) -> Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let level = level(debug);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install logger")?;

    let _ = INSTALLED.set(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_selects_debug_level() {
        assert_eq!(level(true), Level::DEBUG);
    }
}
