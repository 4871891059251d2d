//! Execution environment boundary.
//!
//! The run driver hands a frozen [`Config`] to an [`Environment`] and only
//! looks at the returned [`Report`]'s success predicate. The mutation engine
//! plugs in behind this trait; the crate ships [`Bootstrap`], which prepares
//! a run and reports it without evaluating any subjects.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Coverage expected when `--score` was not given.
pub const DEFAULT_EXPECTED_COVERAGE: f64 = 100.0;

/// Result of a mutation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    subjects: u32,
    mutations: u32,
    kills: u32,
    expected_coverage: f64,
    runtime: Duration,
}

impl Report {
    /// Creates a report. `kills` is clamped to `mutations`.
    #[must_use]
    pub fn new(
        subjects: u32,
        mutations: u32,
        kills: u32,
        expected_coverage: f64,
        runtime: Duration,
    ) -> Self {
        Self {
            subjects,
            mutations,
            kills: kills.min(mutations),
            expected_coverage,
            runtime,
        }
    }

    #[must_use]
    pub const fn subjects(&self) -> u32 {
        self.subjects
    }

    #[must_use]
    pub const fn mutations(&self) -> u32 {
        self.mutations
    }

    #[must_use]
    pub const fn kills(&self) -> u32 {
        self.kills
    }

    /// Mutations the test suite failed to kill.
    #[must_use]
    pub const fn alive(&self) -> u32 {
        self.mutations - self.kills
    }

    #[must_use]
    pub const fn expected_coverage(&self) -> f64 {
        self.expected_coverage
    }

    #[must_use]
    pub const fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Percentage of killed mutations; 100 when there were none.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.mutations == 0 {
            return 100.0;
        }
        f64::from(self.kills) / f64::from(self.mutations) * 100.0
    }

    /// Returns true if the coverage reached the expected value exactly.
    #[must_use]
    pub fn success(&self) -> bool {
        (self.coverage() - self.expected_coverage).abs() < f64::EPSILON
    }
}

/// Entry point of the execution environment.
pub trait Environment {
    /// Runs mutation analysis for `config` and returns its report.
    fn call(&self, config: Config) -> Report;
}

/// Environment that prepares a run without a mutation engine attached.
///
/// Shows the configuration through the selected reporter and reports a run
/// over zero subjects. Logs through whatever subscriber the caller installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bootstrap;

impl Environment for Bootstrap {
    fn call(&self, config: Config) -> Report {
        let started = Instant::now();

        match serde_json::to_string(&config) {
            Ok(json) => debug!(config = %json, "bootstrapping environment"),
            Err(e) => warn!(error = %e, "could not serialize configuration"),
        }

        for directory in config.includes() {
            debug!(directory = %directory, "adding to load path");
        }
        for name in config.requires() {
            debug!(name = %name, "requiring");
        }
        if config.zombie() {
            info!("running zombified");
        }

        let integration = config.integration();
        debug!(
            integration = integration.name(),
            description = integration.description(),
            fail_fast = config.fail_fast(),
            "selected integration"
        );

        let reporter = config.reporter();
        if let Err(e) = reporter.start(&config) {
            warn!(error = %e, "failed to write configuration");
        }

        let report = Report::new(
            0,
            0,
            0,
            config
                .expected_coverage()
                .unwrap_or(DEFAULT_EXPECTED_COVERAGE),
            started.elapsed(),
        );

        if let Err(e) = reporter.report(&report) {
            warn!(error = %e, "failed to write report");
        }

        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::expression::Expression;
    use crate::reporter::{Output, Reporter};

    fn report(mutations: u32, kills: u32, expected_coverage: f64) -> Report {
        Report::new(1, mutations, kills, expected_coverage, Duration::ZERO)
    }

    #[test]
    fn coverage_is_kill_percentage() {
        assert!((report(4, 3, 100.0).coverage() - 75.0).abs() < f64::EPSILON);
        assert!((report(8, 8, 100.0).coverage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coverage_without_mutations_is_full() {
        assert!((report(0, 0, 100.0).coverage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn kills_are_clamped_to_mutations() {
        let report = report(2, 5, 100.0);

        assert_eq!(report.kills(), 2);
        assert_eq!(report.alive(), 0);
    }

    #[test]
    fn success_when_expected_coverage_reached_exactly() {
        assert!(report(4, 4, 100.0).success());
        assert!(report(4, 3, 75.0).success());
    }

    #[test]
    fn failure_when_coverage_differs_from_expected() {
        assert!(!report(4, 3, 100.0).success());
        assert!(!report(4, 4, 75.0).success());
    }

    #[test]
    fn bootstrap_reports_empty_run_with_expected_coverage() {
        let mut builder = Config::builder();
        builder
            .match_expression(Expression::parse("TestApp*").unwrap())
            .reporter(Reporter::cli(Output::Stderr))
            .expected_coverage(99.5);

        let report = Bootstrap.call(builder.build());

        assert_eq!(report.subjects(), 0);
        assert_eq!(report.mutations(), 0);
        assert!((report.expected_coverage() - 99.5).abs() < f64::EPSILON);
        assert!(!report.success());
    }

    #[test]
    fn bootstrap_succeeds_with_default_expectation() {
        let mut builder = Config::builder();
        builder
            .match_expression(Expression::parse("TestApp*").unwrap())
            .reporter(Reporter::cli(Output::Stderr));

        assert!(Bootstrap.call(builder.build()).success());
    }

    #[test]
    fn bootstrap_leaves_global_subscriber_alone() {
        let mut builder = Config::builder();
        builder
            .match_expression(Expression::parse("TestApp*").unwrap())
            .reporter(Reporter::cli(Output::Stderr))
            .debug(true);

        Bootstrap.call(builder.build());

        assert!(!tracing::dispatcher::has_been_set());
    }
}
