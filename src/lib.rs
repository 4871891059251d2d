//! `mutant` - mutation testing command line
//!
//! Turns process arguments into a validated, immutable [`config::Config`]
//! and maps the outcome of a mutation run onto a process exit code.

pub mod cli;
pub mod config;
pub mod env;
pub mod expression;
pub mod integration;
pub mod logging;
pub mod reporter;

/// Version printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
