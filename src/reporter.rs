//! Reporters rendering run progress and results.

use std::io::{self, Write};

use serde::Serialize;

use crate::config::Config;
use crate::env::Report;

/// Width of the label column in rendered output.
const LABEL_WIDTH: usize = 17;

/// Output sink a reporter writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

impl Output {
    fn write_all(self, text: &str) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()
            }
            Self::Stderr => io::stderr().lock().write_all(text.as_bytes()),
        }
    }
}

/// Available reporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reporter {
    /// Plain-text reporter for terminals.
    Cli { output: Output },
}

impl Default for Reporter {
    fn default() -> Self {
        Self::cli(Output::Stdout)
    }
}

impl Reporter {
    /// Creates a CLI reporter writing to `output`.
    #[must_use]
    pub const fn cli(output: Output) -> Self {
        Self::Cli { output }
    }

    /// Returns the sink this reporter writes to.
    #[must_use]
    pub const fn output(&self) -> Output {
        match self {
            Self::Cli { output } => *output,
        }
    }

    /// Writes the configuration header shown before a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink cannot be written.
    pub fn start(&self, config: &Config) -> io::Result<()> {
        self.output().write_all(&self.render_config(config))
    }

    /// Writes the summary of a finished run.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink cannot be written.
    pub fn report(&self, report: &Report) -> io::Result<()> {
        self.output().write_all(&self.render_report(report))
    }

    /// Renders the configuration header.
    #[must_use]
    pub fn render_config(&self, config: &Config) -> String {
        match self {
            Self::Cli { .. } => render_cli_config(config),
        }
    }

    /// Renders the run summary.
    #[must_use]
    pub fn render_report(&self, report: &Report) -> String {
        match self {
            Self::Cli { .. } => render_cli_report(report),
        }
    }
}

fn render_cli_config(config: &Config) -> String {
    let matcher = config.matcher_config();
    let mut out = String::from("Mutant configuration:\n");

    push_line(&mut out, "Matcher:", &join(matcher.match_expressions()));
    if !matcher.subject_ignores().is_empty() {
        push_line(&mut out, "Ignores:", &join(matcher.subject_ignores()));
    }
    for select in matcher.subject_selects() {
        push_line(
            &mut out,
            "Select:",
            &format!("{} {}", select.kind, select.pattern),
        );
    }
    push_line(&mut out, "Integration:", config.integration().name());
    push_line(
        &mut out,
        "Expect Coverage:",
        &percent(config.expected_coverage().unwrap_or(100.0)),
    );
    if !config.includes().is_empty() {
        push_line(&mut out, "Includes:", &config.includes().join(" "));
    }
    if !config.requires().is_empty() {
        push_line(&mut out, "Requires:", &config.requires().join(" "));
    }
    out
}

fn render_cli_report(report: &Report) -> String {
    let mut out = String::new();

    push_line(&mut out, "Subjects:", &report.subjects().to_string());
    push_line(&mut out, "Mutations:", &report.mutations().to_string());
    push_line(&mut out, "Kills:", &report.kills().to_string());
    push_line(&mut out, "Alive:", &report.alive().to_string());
    push_line(
        &mut out,
        "Runtime:",
        &format!("{:.2}s", report.runtime().as_secs_f64()),
    );
    push_line(&mut out, "Coverage:", &percent(report.coverage()));
    push_line(&mut out, "Expected:", &percent(report.expected_coverage()));
    out
}

fn push_line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{label:<LABEL_WIDTH$}{value}\n"));
}

fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
