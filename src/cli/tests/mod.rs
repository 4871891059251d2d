//! Tests for the cli module.
//!
//! - `helpers` - Expected configurations and a recording environment
//! - `errors` - Invalid invocations and their messages
//! - `parse` - Flags and positional expressions producing a configuration
//! - `terminate` - `--help` and `--version`
//! - `run` - Exit codes produced by the run driver

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
