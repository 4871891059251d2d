//! Command-line argument parsing and the run driver.
//!
//! [`parse`] turns process arguments into a [`ParseOutcome`]: either a
//! frozen [`Config`] to run, or a [`Terminate`] request for `--help` and
//! `--version`. Parsing has no side effects; [`run`] writes the terminate
//! message and maps the environment's report onto a process exit code.

mod error;
mod help;

use std::ffi::OsString;
use std::io::{self, Write};

use anyhow::Context;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser};

use crate::config::{Config, SubjectSelect};
use crate::env::Environment;
use crate::expression::Expression;
use crate::integration::IntegrationRegistry;

pub use error::CliError;
pub use help::{USAGE, version_message};

/// Exit code for a successful run, or after `--help`/`--version`.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for a run whose report signals failure.
pub const EXIT_FAILURE: u8 = 1;

/// Program name passed to the option parser in place of `argv[0]`.
const BIN_NAME: &str = "mutant";

/// Flag whose argument is the expected coverage.
const SCORE_FLAG: &str = "--score";

/// Option table for `mutant [options] MATCH_EXPRESSION ...`.
///
/// Clap's own help and version output are disabled; `--help` and
/// `--version` are intercepted and answered with [`USAGE`] and
/// [`version_message`]. Options taking an argument consume the next token
/// even if it starts with `-`.
#[derive(Parser, Debug)]
#[command(
    name = BIN_NAME,
    version,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Args {
    /// Run mutant zombified
    #[arg(long)]
    zombie: bool,

    /// Add DIRECTORY to $LOAD_PATH
    #[arg(
        short = 'I',
        long = "include",
        value_name = "DIRECTORY",
        allow_hyphen_values = true
    )]
    includes: Vec<String>,

    /// Require file with NAME
    #[arg(
        short = 'r',
        long = "require",
        value_name = "NAME",
        allow_hyphen_values = true
    )]
    requires: Vec<String>,

    /// Fail unless COVERAGE is not reached exactly
    #[arg(long = "score", value_name = "COVERAGE", allow_hyphen_values = true)]
    scores: Vec<String>,

    /// Use STRATEGY for killing mutations
    #[arg(long = "use", value_name = "STRATEGY", allow_hyphen_values = true)]
    strategies: Vec<String>,

    /// Ignore subjects that match PATTERN
    #[arg(
        long = "ignore-subject",
        value_name = "PATTERN",
        allow_hyphen_values = true
    )]
    ignore_subjects: Vec<String>,

    /// Scope execution to subjects with CODE
    #[arg(long = "code", value_name = "CODE", allow_hyphen_values = true)]
    codes: Vec<String>,

    /// Fail fast
    #[arg(long)]
    fail_fast: bool,

    /// Print mutants version
    #[allow(dead_code)] // Never populated: clap stops parsing at this flag
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Enable debugging output
    #[arg(short, long)]
    debug: bool,

    /// Show this message
    #[allow(dead_code)] // Never populated: clap stops parsing at this flag
    #[arg(short, long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Expressions selecting the subjects to mutate
    #[arg(value_name = "MATCH_EXPRESSION")]
    expressions: Vec<String>,
}

impl Args {
    /// Validates the collected values and freezes them into a [`Config`].
    ///
    /// Repeated `--score`/`--use` values are all validated; the last one wins.
    fn into_config(self, registry: &IntegrationRegistry) -> Result<Config, CliError> {
        let mut builder = Config::builder();
        builder
            .zombie(self.zombie)
            .fail_fast(self.fail_fast)
            .debug(self.debug);

        for directory in self.includes {
            builder.include(directory);
        }
        for name in self.requires {
            builder.require(name);
        }
        for score in &self.scores {
            builder.expected_coverage(parse_coverage(score)?);
        }
        for name in &self.strategies {
            let integration = registry
                .resolve(name)
                .ok_or_else(|| CliError::UnknownIntegration { name: name.clone() })?;
            builder.integration(integration);
        }
        for pattern in &self.ignore_subjects {
            builder.ignore_subject(Expression::parse(pattern)?);
        }
        for code in self.codes {
            builder.select_subject(SubjectSelect::code(code));
        }
        for expression in &self.expressions {
            builder.match_expression(Expression::parse(expression)?);
        }

        if !builder.has_match_expressions() {
            return Err(CliError::NoExpressions);
        }

        Ok(builder.build())
    }
}

/// Request to print a message and exit without running anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminate {
    message: String,
    code: u8,
}

impl Terminate {
    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: EXIT_SUCCESS,
        }
    }

    /// Message to print to standard output.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit code to terminate with.
    #[must_use]
    pub const fn code(&self) -> u8 {
        self.code
    }

    /// Writes the message and a trailing newline to `out`, then returns the
    /// exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` cannot be written or flushed.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<u8> {
        writeln!(out, "{}", self.message)?;
        out.flush()?;
        Ok(self.code)
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Arguments describe a run.
    Run(Config),
    /// `--help` or `--version` was given.
    Terminate(Terminate),
}

/// Parses `arguments` (without the program name) using the built-in
/// integrations.
///
/// # Errors
///
/// Returns [`CliError`] for unknown flags, flags missing their argument,
/// malformed values, unknown integrations and an empty expression list.
pub fn parse<I, T>(arguments: I) -> Result<ParseOutcome, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    parse_with(arguments, &IntegrationRegistry::with_builtins())
}

/// Parses `arguments`, resolving `--use` against `registry`.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with<I, T>(
    arguments: I,
    registry: &IntegrationRegistry,
) -> Result<ParseOutcome, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let arguments: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    let argv = std::iter::once(OsString::from(BIN_NAME)).chain(arguments.iter().cloned());

    match Args::try_parse_from(argv) {
        Ok(args) => args.into_config(registry).map(ParseOutcome::Run),
        Err(error) => translate_error(&error, &arguments),
    }
}

/// Parses `arguments` and runs the resulting configuration in `env`.
///
/// `--help` and `--version` write their message to `out` and return
/// [`EXIT_SUCCESS`] without touching `env`.
///
/// # Errors
///
/// Returns the [`CliError`] if the arguments are invalid, in which case
/// `env` is not called, or an I/O error if `out` cannot be written.
pub fn run<I, T, E, W>(arguments: I, env: &E, out: &mut W) -> anyhow::Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    E: Environment + ?Sized,
    W: Write + ?Sized,
{
    match parse(arguments)? {
        ParseOutcome::Run(config) => Ok(execute(config, env)),
        ParseOutcome::Terminate(terminate) => terminate
            .write_to(out)
            .context("Failed to write to standard output"),
    }
}

/// Hands `config` to `env` and maps the report onto an exit code.
pub fn execute<E: Environment + ?Sized>(config: Config, env: &E) -> u8 {
    exit_code(env.call(config).success())
}

/// Maps a run's success onto a process exit code.
#[must_use]
pub const fn exit_code(success: bool) -> u8 {
    if success { EXIT_SUCCESS } else { EXIT_FAILURE }
}

fn parse_coverage(text: &str) -> Result<f64, CliError> {
    text.parse::<f64>()
        .ok()
        .filter(|coverage| coverage.is_finite())
        .ok_or_else(|| CliError::InvalidArgument {
            flag: SCORE_FLAG.to_string(),
            value: text.to_string(),
        })
}

fn translate_error(error: &clap::Error, arguments: &[OsString]) -> Result<ParseOutcome, CliError> {
    match error.kind() {
        ErrorKind::DisplayHelp => Ok(ParseOutcome::Terminate(Terminate::success(USAGE))),
        ErrorKind::DisplayVersion => Ok(ParseOutcome::Terminate(Terminate::success(
            version_message(),
        ))),
        ErrorKind::UnknownArgument => Err(CliError::InvalidOption(unknown_option(
            error, arguments,
        ))),
        ErrorKind::TooManyValues => Err(CliError::NeedlessArgument(needless_argument(
            error, arguments,
        ))),
        // Option arguments may start with `-`, so a value is only missing
        // when the option is the final token.
        ErrorKind::InvalidValue => Err(CliError::MissingArgument(missing_argument_flag(
            error, arguments,
        ))),
        kind => Err(CliError::Other(
            kind.as_str().unwrap_or("invalid arguments").to_string(),
        )),
    }
}

fn invalid_arg(error: &clap::Error) -> Option<String> {
    match error.get(ContextKind::InvalidArg)? {
        ContextValue::String(arg) => Some(arg.clone()),
        _ => None,
    }
}

/// Options given by the user, up to the `--` terminator.
fn option_tokens(arguments: &[OsString]) -> impl Iterator<Item = &str> {
    arguments
        .iter()
        .filter_map(|token| token.to_str())
        .take_while(|token| *token != "--")
        .filter(|token| token.starts_with('-') && token.len() > 1)
}

/// Returns the whole token holding the unknown option: `-xy` rather than
/// `-x`. Long options are reported without their `=value`.
fn unknown_option(error: &clap::Error, arguments: &[OsString]) -> String {
    let Some(reported) = invalid_arg(error) else {
        return String::new();
    };
    let Some(short) = reported
        .strip_prefix('-')
        .filter(|rest| !rest.starts_with('-'))
        .and_then(|rest| rest.chars().next())
    else {
        return reported;
    };

    option_tokens(arguments)
        .find(|token| !token.starts_with("--") && token[1..].contains(short))
        .map_or(reported, str::to_string)
}

/// Returns the `--flag=value` token given to an option that takes no
/// argument.
fn needless_argument(error: &clap::Error, arguments: &[OsString]) -> String {
    let flag = invalid_arg(error)
        .and_then(|rendered| rendered.split_whitespace().next().map(str::to_string))
        .unwrap_or_default();

    option_tokens(arguments)
        .find(|token| {
            token
                .split_once('=')
                .is_some_and(|(name, _)| name == flag)
        })
        .map_or(flag, str::to_string)
}

/// Returns the option as the user typed it, e.g. `-I` rather than
/// `--include <DIRECTORY>`.
fn missing_argument_flag(error: &clap::Error, arguments: &[OsString]) -> String {
    let typed = arguments.last().and_then(|token| token.to_str());

    match typed {
        Some(token) if token.starts_with("--") => token
            .split_once('=')
            .map_or(token, |(flag, _)| flag)
            .to_string(),
        Some(token) if token.starts_with('-') && token.len() > 1 => token
            .chars()
            .last()
            .map(|short| format!("-{short}"))
            .unwrap_or_default(),
        _ => invalid_arg(error)
            .and_then(|rendered| rendered.split_whitespace().next().map(str::to_string))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests;
