//! CLI error types.

use pagelink_config::ConfigError;
use pagelink_site::LinkError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Link(#[from] LinkError),

    #[error("{0} out of date, run without --check to update")]
    Stale(String),
}
