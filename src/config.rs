//! Run configuration produced by the argument parser.
//!
//! [`Config`] and [`MatcherConfig`] are immutable once built. The parser
//! accumulates into a [`ConfigBuilder`] and freezes it with
//! [`ConfigBuilder::build`]; [`MatcherConfig`] can additionally be derived
//! from an existing value through its `with_*` methods, which return a new
//! value and leave the original untouched.

use std::fmt;

use serde::Serialize;

use crate::expression::Expression;
use crate::integration::Integration;
use crate::reporter::Reporter;

/// Kind of attribute a subject selector filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// Subject code identifier, selected with `--code`.
    Code,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => f.write_str(":code"),
        }
    }
}

/// A `(selector-kind, pattern)` pair restricting the subjects to run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubjectSelect {
    pub kind: SelectorKind,
    pub pattern: String,
}

impl SubjectSelect {
    /// Selects subjects by code identifier.
    #[must_use]
    pub fn code(pattern: impl Into<String>) -> Self {
        Self {
            kind: SelectorKind::Code,
            pattern: pattern.into(),
        }
    }
}

/// Expressions and filters handed to the subject matcher.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MatcherConfig {
    match_expressions: Vec<Expression>,
    subject_ignores: Vec<Expression>,
    subject_selects: Vec<SubjectSelect>,
}

impl MatcherConfig {
    /// Matcher configuration with every list empty.
    pub const DEFAULT: Self = Self {
        match_expressions: Vec::new(),
        subject_ignores: Vec::new(),
        subject_selects: Vec::new(),
    };

    /// Expressions selecting the subjects to mutate.
    #[must_use]
    pub fn match_expressions(&self) -> &[Expression] {
        &self.match_expressions
    }

    /// Expressions excluding subjects from the run.
    #[must_use]
    pub fn subject_ignores(&self) -> &[Expression] {
        &self.subject_ignores
    }

    /// Additional selectors restricting the subjects to run.
    #[must_use]
    pub fn subject_selects(&self) -> &[SubjectSelect] {
        &self.subject_selects
    }

    /// Returns a copy with `match_expressions` replaced.
    #[must_use]
    pub fn with_match_expressions(&self, match_expressions: Vec<Expression>) -> Self {
        Self {
            match_expressions,
            ..self.clone()
        }
    }

    /// Returns a copy with `subject_ignores` replaced.
    #[must_use]
    pub fn with_subject_ignores(&self, subject_ignores: Vec<Expression>) -> Self {
        Self {
            subject_ignores,
            ..self.clone()
        }
    }

    /// Returns a copy with `subject_selects` replaced.
    #[must_use]
    pub fn with_subject_selects(&self, subject_selects: Vec<SubjectSelect>) -> Self {
        Self {
            subject_selects,
            ..self.clone()
        }
    }
}

/// Complete configuration of one mutant run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Config {
    integration: Integration,
    reporter: Reporter,
    matcher_config: MatcherConfig,
    includes: Vec<String>,
    requires: Vec<String>,
    expected_coverage: Option<f64>,
    fail_fast: bool,
    debug: bool,
    zombie: bool,
}

impl Config {
    /// Starts building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    #[must_use]
    pub const fn integration(&self) -> Integration {
        self.integration
    }

    #[must_use]
    pub const fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    #[must_use]
    pub const fn matcher_config(&self) -> &MatcherConfig {
        &self.matcher_config
    }

    /// Directories added to the load path, in flag order.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Libraries required before the run, in flag order.
    #[must_use]
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// Coverage percentage the run must reach exactly, if given.
    #[must_use]
    pub const fn expected_coverage(&self) -> Option<f64> {
        self.expected_coverage
    }

    #[must_use]
    pub const fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub const fn zombie(&self) -> bool {
        self.zombie
    }
}

/// Mutable accumulator for a [`Config`].
///
/// List-valued setters append; scalar setters overwrite.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    integration: Integration,
    reporter: Reporter,
    match_expressions: Vec<Expression>,
    subject_ignores: Vec<Expression>,
    subject_selects: Vec<SubjectSelect>,
    includes: Vec<String>,
    requires: Vec<String>,
    expected_coverage: Option<f64>,
    fail_fast: bool,
    debug: bool,
    zombie: bool,
}

impl ConfigBuilder {
    pub fn integration(&mut self, integration: Integration) -> &mut Self {
        self.integration = integration;
        self
    }

    pub fn reporter(&mut self, reporter: Reporter) -> &mut Self {
        self.reporter = reporter;
        self
    }

    pub fn match_expression(&mut self, expression: Expression) -> &mut Self {
        self.match_expressions.push(expression);
        self
    }

    pub fn ignore_subject(&mut self, expression: Expression) -> &mut Self {
        self.subject_ignores.push(expression);
        self
    }

    pub fn select_subject(&mut self, select: SubjectSelect) -> &mut Self {
        self.subject_selects.push(select);
        self
    }

    pub fn include(&mut self, directory: impl Into<String>) -> &mut Self {
        self.includes.push(directory.into());
        self
    }

    pub fn require(&mut self, name: impl Into<String>) -> &mut Self {
        self.requires.push(name.into());
        self
    }

    pub fn expected_coverage(&mut self, coverage: f64) -> &mut Self {
        self.expected_coverage = Some(coverage);
        self
    }

    pub fn fail_fast(&mut self, fail_fast: bool) -> &mut Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    pub fn zombie(&mut self, zombie: bool) -> &mut Self {
        self.zombie = zombie;
        self
    }

    /// Returns true if at least one match expression was added.
    #[must_use]
    pub fn has_match_expressions(&self) -> bool {
        !self.match_expressions.is_empty()
    }

    /// Freezes the accumulated values into a [`Config`].
    #[must_use]
    pub fn build(self) -> Config {
        let matcher_config = MatcherConfig::DEFAULT
            .with_match_expressions(self.match_expressions)
            .with_subject_ignores(self.subject_ignores)
            .with_subject_selects(self.subject_selects);

        Config {
            integration: self.integration,
            reporter: self.reporter,
            matcher_config,
            includes: self.includes,
            requires: self.requires,
            expected_coverage: self.expected_coverage,
            fail_fast: self.fail_fast,
            debug: self.debug,
            zombie: self.zombie,
        }
    }
}
