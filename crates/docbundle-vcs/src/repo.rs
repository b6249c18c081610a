//! Repository discovery backed by gix.

use std::path::Path;

use crate::error::VcsError;

/// Name of the remote the bundle links to.
const ORIGIN: &str = "origin";

/// A discovered git repository.
pub struct Repository {
    repo: gix::Repository,
}

impl Repository {
    /// Find the repository containing `path`, searching parent directories.
    pub fn discover(path: &Path) -> Result<Self, VcsError> {
        let repo = gix::discover(path).map_err(|e| VcsError::Discover {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        tracing::debug!(git_dir = %repo.git_dir().display(), "Discovered repository");
        Ok(Self { repo })
    }

    /// Root of the working tree, if the repository is not bare.
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Fetch URL of the `origin` remote, as configured.
    pub fn origin_url(&self) -> Result<String, VcsError> {
        let remote = self
            .repo
            .find_remote(ORIGIN)
            .map_err(|e| VcsError::NoOrigin(Box::new(e)))?;
        let url = remote
            .url(gix::remote::Direction::Fetch)
            .ok_or(VcsError::NoOriginUrl)?;
        Ok(url.to_bstring().to_string())
    }

    /// Short name of the branch HEAD points at (e.g. `main`).
    ///
    /// Works on unborn branches. Fails when HEAD is detached.
    pub fn branch(&self) -> Result<String, VcsError> {
        let name = self
            .repo
            .head_name()
            .map_err(|e| VcsError::Head(Box::new(e)))?
            .ok_or(VcsError::DetachedHead)?;
        Ok(name.shorten().to_string())
    }
}
