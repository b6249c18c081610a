//! VCS error types.

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by repository lookups.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// No git repository contains the given path.
    #[error("No git repository found at {}: {source}", path.display())]
    Discover {
        /// Path discovery started from.
        path: PathBuf,
        /// Underlying gix error.
        #[source]
        source: BoxError,
    },

    /// The `origin` remote is not configured.
    #[error("No remote named 'origin': {0}")]
    NoOrigin(#[source] BoxError),

    /// The `origin` remote has no fetch URL.
    #[error("Remote 'origin' has no URL")]
    NoOriginUrl,

    /// HEAD does not point at a branch.
    #[error("No branch name: HEAD is detached")]
    DetachedHead,

    /// HEAD could not be read.
    #[error("Failed to read HEAD: {0}")]
    Head(#[source] BoxError),
}
