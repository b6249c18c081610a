//! Repository browse URLs for compiled nodes.

/// Builds `<origin>/tree/<branch>/<entry_folder><relative_path>` links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base: String,
}

impl UrlBuilder {
    /// Create a builder.
    ///
    /// * `origin_base` - https base of the repository (e.g. `https://host/org/repo`)
    /// * `branch` - branch the links point at
    /// * `entry_folder` - docs root inside the repository (e.g. `docs`); may be empty
    #[must_use]
    pub fn new(origin_base: &str, branch: &str, entry_folder: &str) -> Self {
        let origin = origin_base.trim_end_matches('/');
        let entry = entry_folder.replace('\\', "/");
        let entry = entry.trim_matches('/');
        let base = if entry.is_empty() {
            format!("{origin}/tree/{branch}")
        } else {
            format!("{origin}/tree/{branch}/{entry}")
        };
        Self { base }
    }

    /// Link prefix shared by every node.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Link for an entry at `relative_path` below the docs root.
    ///
    /// `relative_path` is `/`-separated with a leading `/` (e.g. `/guide/intro.md`).
    #[must_use]
    pub fn url_for(&self, relative_path: &str) -> String {
        format!("{}{}", self.base, relative_path)
    }
}
