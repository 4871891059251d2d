//! Text printed by `--help` and `--version`.

use crate::VERSION;

/// Usage banner and option catalog, without a trailing newline.
pub const USAGE: &str = "\
usage: mutant [options] MATCH_EXPRESSION ...
Environment:
        --zombie                     Run mutant zombified
    -I, --include DIRECTORY          Add DIRECTORY to $LOAD_PATH
    -r, --require NAME               Require file with NAME

Options:
        --score COVERAGE             Fail unless COVERAGE is not reached exactly
        --use STRATEGY               Use STRATEGY for killing mutations
        --ignore-subject PATTERN     Ignore subjects that match PATTERN
        --code CODE                  Scope execution to subjects with CODE
        --fail-fast                  Fail fast
        --version                    Print mutants version
    -d, --debug                      Enable debugging output
    -h, --help                       Show this message";

/// Returns the `--version` message.
#[must_use]
pub fn version_message() -> String {
    format!("mutant-{VERSION}")
}
