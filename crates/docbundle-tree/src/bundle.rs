//! Bundle serialization and output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TreeError, TreeErrorKind};
use crate::node::Node;

/// Serialize the compiled tree to JSON.
///
/// Compact by default. Output depends only on the tree, so an unchanged
/// input produces byte-identical bundles.
pub fn render(nodes: &[Node], pretty: bool) -> Result<String, TreeError> {
    let result = if pretty {
        serde_json::to_string_pretty(nodes)
    } else {
        serde_json::to_string(nodes)
    };
    result.map_err(|e| TreeError::new(TreeErrorKind::Serialize).with_source(e))
}

/// Write bundle contents to `path`.
///
/// Writes a sibling temporary file first and renames it into place, so
/// an existing bundle is never left half-written.
pub fn write_bundle(path: &Path, contents: &str) -> Result<(), TreeError> {
    let tmp_path = temp_path(path);
    if let Err(e) = fs::write(&tmp_path, contents) {
        // Best effort; the write error is what matters.
        let _ = fs::remove_file(&tmp_path);
        return Err(TreeError::io(e, path));
    }
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TreeError::io(e, path)
    })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote bundle");
    Ok(())
}

/// `dir/.name.tmp` next to `path`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "bundle".into(), |n| n.to_string_lossy());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::Headings;

    fn tree() -> Vec<Node> {
        vec![Node::document(
            "intro",
            "Intro",
            "# Intro",
            "https://host/org/repo/tree/main/docs/intro.md",
            Headings::new(),
        )]
    }

    #[test]
    fn test_render_compact() {
        let json = render(&tree(), false).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with("[{\"name\":\"intro\",\"title\":\"Intro\""));
    }

    #[test]
    fn test_render_pretty() {
        let json = render(&tree(), true).unwrap();
        assert!(json.contains("\n  {"));
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render(&[], false).unwrap(), "[]");
    }

    #[test]
    fn test_write_bundle_replaces_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bundle.json");
        fs::write(&path, "old").unwrap();

        write_bundle(&path, "[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!temp_dir.path().join(".bundle.json.tmp").exists());
    }

    #[test]
    fn test_write_bundle_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("bundle.json");

        let err = write_bundle(&path, "[]").unwrap_err();

        assert_eq!(err.kind(), TreeErrorKind::NotFound);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/out/bundleDev.json")),
            PathBuf::from("/out/.bundleDev.json.tmp")
        );
    }
}
