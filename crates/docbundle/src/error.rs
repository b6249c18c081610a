//! CLI error types.

use docbundle_config::ConfigError;
use docbundle_tree::TreeError;
use docbundle_vcs::VcsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Vcs(#[from] VcsError),

    #[error("{0}")]
    Tree(#[from] TreeError),
}
