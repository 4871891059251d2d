//! Shared test utilities for the cli module.
//!
//! - `arguments` - Flags followed by the default `TestApp*` expression
//! - `parse_config` - Parses and unwraps a run configuration
//! - `expected_config` - Builder preloaded with the default expression
//! - `RecordingEnv` - Environment returning a fixed report
//! - `FullWriter` - Sink whose every write fails

use std::cell::RefCell;
use std::io::{self, Write};
use std::time::Duration;

use crate::cli::{ParseOutcome, parse};
use crate::config::{Config, ConfigBuilder};
use crate::env::{Environment, Report};
use crate::expression::Expression;

/// Expression appended to every invocation unless a test says otherwise.
pub const DEFAULT_EXPRESSION: &str = "TestApp*";

/// Returns `flags` followed by [`DEFAULT_EXPRESSION`].
pub fn arguments(flags: &[&str]) -> Vec<String> {
    flags
        .iter()
        .copied()
        .chain(std::iter::once(DEFAULT_EXPRESSION))
        .map(str::to_string)
        .collect()
}

/// Parses `arguments`, panicking unless they describe a run.
pub fn parse_config<S: AsRef<str>>(arguments: &[S]) -> Config {
    match parse(arguments.iter().map(AsRef::as_ref)).unwrap() {
        ParseOutcome::Run(config) => config,
        ParseOutcome::Terminate(terminate) => {
            panic!("expected a run, got terminate: {terminate:?}")
        }
    }
}

/// Returns the parsed form of `input`.
pub fn expression(input: &str) -> Expression {
    Expression::parse(input).unwrap()
}

/// Builder holding only the default match expression.
pub fn expected_config() -> ConfigBuilder {
    let mut builder = Config::builder();
    builder.match_expression(expression(DEFAULT_EXPRESSION));
    builder
}

/// Environment returning a fixed report and recording every config it
/// was called with.
pub struct RecordingEnv {
    report: Report,
    calls: RefCell<Vec<Config>>,
}

impl RecordingEnv {
    pub fn new(success: bool) -> Self {
        let kills = if success { 4 } else { 3 };
        Self {
            report: Report::new(1, 4, kills, 100.0, Duration::ZERO),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Config> {
        self.calls.borrow().clone()
    }
}

impl Environment for RecordingEnv {
    fn call(&self, config: Config) -> Report {
        self.calls.borrow_mut().push(config);
        self.report.clone()
    }
}

/// Writer behaving like a full disk.
pub struct FullWriter;

impl Write for FullWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("No space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
