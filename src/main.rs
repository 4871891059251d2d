//! `mutant` - mutation testing command line
//!
//! Entry point for the binary.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use mutant::cli::{self, ParseOutcome};
use mutant::env::Bootstrap;
use mutant::logging;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let _ = writeln!(io::stderr(), "{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<u8> {
    let config = match cli::parse(std::env::args_os().skip(1))? {
        ParseOutcome::Run(config) => config,
        ParseOutcome::Terminate(terminate) => {
            return terminate
                .write_to(&mut io::stdout().lock())
                .context("Failed to write to standard output");
        }
    };

    if let Err(e) = logging::init(config.debug()) {
        let _ = writeln!(io::stderr(), "Warning: {e:#}");
    }

    Ok(cli::execute(config, &Bootstrap))
}
