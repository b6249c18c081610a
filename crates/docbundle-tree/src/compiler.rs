//! Recursive compilation of a documentation directory into [`Node`]s.

use std::fs;
use std::path::Path;

use crate::error::{TreeError, TreeErrorKind};
use crate::headings::{extract_headings, first_title};
use crate::manifest::Manifest;
use crate::node::Node;
use crate::ordering::{UnlistedPlacement, missing_names, sort_by_manifest};
use crate::scanner::{Entry, list_entries};
use crate::url::UrlBuilder;

/// Default manifest filename.
const DEFAULT_MANIFEST: &str = "_order.yml";

/// Default document extension.
const DEFAULT_EXTENSION: &str = "md";

/// Options controlling compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Per-directory manifest filename (e.g. `_order.yml`).
    pub manifest_name: String,
    /// Extension (without dot) of document files.
    pub extension: String,
    /// Placement of entries a manifest does not list.
    pub unlisted: UnlistedPlacement,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            manifest_name: DEFAULT_MANIFEST.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
            unlisted: UnlistedPlacement::default(),
        }
    }
}

/// Compiles a documentation directory tree.
///
/// Each directory is ordered by its own manifest; a subdirectory takes its
/// title from the manifest of the directory containing it.
pub struct Compiler {
    options: CompileOptions,
    urls: UrlBuilder,
}

impl Compiler {
    /// Create a compiler.
    #[must_use]
    pub fn new(options: CompileOptions, urls: UrlBuilder) -> Self {
        Self { options, urls }
    }

    /// Compile `root` into its ordered top-level nodes.
    ///
    /// Fails on the first unreadable directory, unreadable or non-UTF-8
    /// document, or malformed manifest; no partial tree is returned.
    pub fn compile(&self, root: &Path) -> Result<Vec<Node>, TreeError> {
        let metadata = fs::metadata(root).map_err(|e| TreeError::io(e, root))?;
        if !metadata.is_dir() {
            return Err(TreeError::new(TreeErrorKind::NotADirectory).with_path(root));
        }
        tracing::info!(root = %root.display(), base = self.urls.base(), "Compiling documentation tree");
        self.compile_directory(root, "")
    }

    /// Compile one directory. `rel_path` is its `/`-prefixed path below the root.
    fn compile_directory(&self, dir: &Path, rel_path: &str) -> Result<Vec<Node>, TreeError> {
        let mut entries = list_entries(dir)?;
        let manifest = Manifest::load(dir, &self.options.manifest_name)?;

        if let Some(manifest) = &manifest {
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            for missing in missing_names(manifest, &names) {
                tracing::warn!(dir = %dir.display(), name = missing, "Manifest lists an entry that does not exist");
            }
        }

        sort_by_manifest(&mut entries, manifest.as_ref(), self.options.unlisted, |e| {
            e.name.as_str()
        });
        tracing::debug!(dir = %dir.display(), entries = entries.len(), has_manifest = manifest.is_some(), "Compiling directory");

        let mut nodes = Vec::with_capacity(entries.len());
        for entry in &entries {
            let entry_rel = format!("{rel_path}/{}", entry.file_name);
            if entry.is_dir {
                let children = self.compile_directory(&entry.path, &entry_rel)?;
                let title = manifest
                    .as_ref()
                    .and_then(|m| m.title_for(&entry.name))
                    .unwrap_or(&entry.name);
                nodes.push(Node::section(
                    entry.name.as_str(),
                    title,
                    children,
                    self.urls.url_for(&entry_rel),
                ));
            } else if self.is_document(entry) {
                nodes.push(self.compile_document(entry, &entry_rel)?);
            } else {
                tracing::trace!(path = %entry.path.display(), "Skipping non-document file");
            }
        }

        Ok(nodes)
    }

    /// Build a document node from a markdown file.
    fn compile_document(&self, entry: &Entry, rel_path: &str) -> Result<Node, TreeError> {
        let text = fs::read_to_string(&entry.path).map_err(|e| TreeError::io(e, &entry.path))?;
        let headings = extract_headings(&text);
        let title = first_title(&headings).unwrap_or(&entry.name).to_owned();
        tracing::debug!(path = %entry.path.display(), title = %title, "Compiled document");
        Ok(Node::document(
            entry.name.as_str(),
            title,
            text,
            self.urls.url_for(rel_path),
            headings,
        ))
    }

    fn is_document(&self, entry: &Entry) -> bool {
        entry.file_name != self.options.manifest_name
            && entry.extension.as_deref() == Some(self.options.extension.as_str())
    }
}
