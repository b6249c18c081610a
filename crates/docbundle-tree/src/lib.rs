//! Documentation tree compiler.
//!
//! Walks a directory of markdown files and produces an ordered tree of
//! [`Node`]s ready to be serialized as a bundle:
//!
//! - Per-directory ordering from YAML manifests ([`Manifest`])
//! - Heading extraction per document ([`extract_headings`])
//! - Repository browse links per node ([`UrlBuilder`])
//! - JSON output ([`render`], [`write_bundle`])
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use docbundle_tree::{CompileOptions, Compiler, UrlBuilder, render};
//!
//! let urls = UrlBuilder::new("https://github.com/org/repo", "main", "docs");
//! let compiler = Compiler::new(CompileOptions::default(), urls);
//! let nodes = compiler.compile(Path::new("docs"))?;
//! let json = render(&nodes, false)?;
//! ```

mod bundle;
mod compiler;
mod error;
mod headings;
mod manifest;
mod node;
mod ordering;
mod scanner;
mod url;

pub use bundle::{render, write_bundle};
pub use compiler::{CompileOptions, Compiler};
pub use error::{TreeError, TreeErrorKind};
pub use headings::{extract_headings, first_title};
pub use manifest::{Manifest, ManifestEntry, ManifestError};
pub use node::{Content, Headings, Node, TreeStats};
pub use ordering::{UnlistedPlacement, missing_names, rank, sort_by_manifest};
pub use url::UrlBuilder;
