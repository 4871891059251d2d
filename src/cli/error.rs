//! Errors raised while turning arguments into a configuration.

use crate::expression::InvalidExpression;

/// User input error detected before any mutation work begins.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("needless argument: {0}")]
    NeedlessArgument(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("invalid argument: {flag} {value}")]
    InvalidArgument { flag: String, value: String },

    #[error("No expressions given")]
    NoExpressions,

    #[error(
        "Could not load integration {name:?} (you may want to try installing the gem mutant-{name})"
    )]
    UnknownIntegration { name: String },

    #[error(transparent)]
    InvalidExpression(#[from] InvalidExpression),

    /// Any other argument error reported by the option parser.
    #[error("{0}")]
    Other(String),
}
