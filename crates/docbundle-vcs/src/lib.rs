//! Git repository lookup for docbundle.
//!
//! The bundle links every document back to the hosted repository, which
//! needs two facts about the checkout being compiled:
//!
//! - the URL of the `origin` remote ([`Repository::origin_url`])
//! - the name of the branch HEAD points at ([`Repository::branch`])
//!
//! [`normalize_origin`] turns a clone URL (`git@host:org/repo.git`,
//! `ssh://...`, `https://...`) into the https base used for browse links.

mod error;
mod origin;
mod repo;

pub use error::VcsError;
pub use origin::normalize_origin;
pub use repo::Repository;
