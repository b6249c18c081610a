//! Ordering manifests (`_order.yml`).
//!
//! A manifest is a YAML list. Each item is either a bare entry name or a
//! single-key mapping from entry name to display title:
//!
//! ```yaml
//! - intro
//! - getting-started: Getting Started
//! - reference
//! ```
//!
//! Names match entry file names with the document extension stripped, and
//! directory names as-is.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{TreeError, TreeErrorKind};

/// One item of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    /// Bare entry name.
    Name(String),
    /// Entry name with a display title.
    Titled {
        /// Entry name.
        name: String,
        /// Display title.
        title: String,
    },
}

impl ManifestEntry {
    /// Entry name this item refers to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Titled { name, .. } => name,
        }
    }

    /// Title this item declares. A bare name declares itself.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Titled { title, .. } => title,
        }
    }
}

/// Manifest parsing error.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Malformed YAML.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Root is not a list.
    #[error("expected a list of entries, found {0}")]
    NotASequence(&'static str),
    /// An item has an unsupported shape.
    #[error("entry {index}: {message}")]
    Entry {
        /// Zero-based item index.
        index: usize,
        /// What is wrong with it.
        message: String,
    },
}

/// Parsed ordering manifest of one directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create a manifest from entries.
    #[must_use]
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Parse manifest YAML.
    ///
    /// Empty content or an explicit null yields an empty manifest.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let items = match serde_yaml::from_str::<Value>(trimmed)? {
            Value::Null => return Ok(Self::default()),
            Value::Sequence(items) => items,
            other => return Err(ManifestError::NotASequence(kind_name(&other))),
        };

        let entries = items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_entry(item).map_err(|message| ManifestError::Entry { index, message }))
            .collect::<Result<_, _>>()?;

        Ok(Self { entries })
    }

    /// Load `dir/file_name`.
    ///
    /// Returns `Ok(None)` when the directory has no manifest.
    pub fn load(dir: &Path, file_name: &str) -> Result<Option<Self>, TreeError> {
        let path = dir.join(file_name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TreeError::io(e, path)),
        };

        let manifest = Self::parse(&content).map_err(|e| {
            TreeError::new(TreeErrorKind::Manifest)
                .with_path(&path)
                .with_source(e)
        })?;
        tracing::debug!(path = %path.display(), entries = manifest.len(), "Loaded manifest");
        Ok(Some(manifest))
    }

    /// Manifest items in declared order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the manifest lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first item naming `name`, bare or titled.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    /// Title declared by the first item naming `name`.
    ///
    /// A bare item yields the name itself.
    #[must_use]
    pub fn title_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name() == name)
            .map(ManifestEntry::title)
    }
}

/// Convert one YAML item to an entry.
fn parse_entry(item: &Value) -> Result<ManifestEntry, String> {
    if let Some(name) = scalar_string(item) {
        return Ok(ManifestEntry::Name(name));
    }

    let Value::Mapping(mapping) = item else {
        return Err(format!("expected a name or a mapping, found {}", kind_name(item)));
    };

    let mut pairs = mapping.iter();
    let (Some((key, value)), None) = (pairs.next(), pairs.next()) else {
        return Err(format!(
            "mapping must have exactly one key, found {}",
            mapping.len()
        ));
    };

    let name = scalar_string(key).ok_or_else(|| "mapping key must be a name".to_owned())?;
    match value {
        Value::Null => Ok(ManifestEntry::Name(name)),
        _ => {
            let title = scalar_string(value)
                .ok_or_else(|| format!("title for '{name}' must be a string"))?;
            Ok(ManifestEntry::Titled { name, title })
        }
    }
}

/// String form of a YAML scalar (`2024` and `true` are valid names).
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn name(n: &str) -> ManifestEntry {
        ManifestEntry::Name(n.to_owned())
    }

    fn titled(n: &str, t: &str) -> ManifestEntry {
        ManifestEntry::Titled {
            name: n.to_owned(),
            title: t.to_owned(),
        }
    }

    #[test]
    fn test_parse_bare_and_titled() {
        let yaml = "- intro\n- guide: The Guide\n- reference\n";
        let manifest = Manifest::parse(yaml).unwrap();
        assert_eq!(
            manifest.entries(),
            &[name("intro"), titled("guide", "The Guide"), name("reference")]
        );
    }

    #[test]
    fn test_parse_quoted_and_numeric_names() {
        let yaml = "- \"2024\"\n- 2023\n- 'v1: legacy'\n";
        let manifest = Manifest::parse(yaml).unwrap();
        assert_eq!(
            manifest.entries(),
            &[name("2024"), name("2023"), name("v1: legacy")]
        );
    }

    #[test]
    fn test_parse_key_without_title_is_bare() {
        let manifest = Manifest::parse("- intro:\n").unwrap();
        assert_eq!(manifest.entries(), &[name("intro")]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(Manifest::parse("").unwrap().is_empty());
        assert!(Manifest::parse("  \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_mapping_root() {
        let err = Manifest::parse("intro: Intro\n").unwrap_err();
        assert!(matches!(err, ManifestError::NotASequence("a mapping")));
    }

    #[test]
    fn test_parse_rejects_multi_key_entry() {
        let err = Manifest::parse("- a: A\n  b: B\n").unwrap_err();
        assert!(matches!(err, ManifestError::Entry { index: 0, .. }));
        assert!(err.to_string().contains("exactly one key"));
    }

    #[test]
    fn test_parse_rejects_nested_list() {
        let err = Manifest::parse("- intro\n- [a, b]\n").unwrap_err();
        assert!(matches!(err, ManifestError::Entry { index: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_yaml() {
        let err = Manifest::parse("- [unclosed").unwrap_err();
        assert!(matches!(err, ManifestError::Yaml(_)));
    }

    #[test]
    fn test_position() {
        let manifest = Manifest::new(vec![name("c"), titled("a", "Alpha"), name("b")]);
        assert_eq!(manifest.position("c"), Some(0));
        assert_eq!(manifest.position("a"), Some(1));
        assert_eq!(manifest.position("b"), Some(2));
        assert_eq!(manifest.position("z"), None);
    }

    #[test]
    fn test_title_for() {
        let manifest = Manifest::new(vec![name("intro"), titled("guide", "The Guide")]);
        assert_eq!(manifest.title_for("guide"), Some("The Guide"));
        assert_eq!(manifest.title_for("intro"), Some("intro"));
        assert_eq!(manifest.title_for("missing"), None);
    }

    #[test]
    fn test_first_match_wins_across_forms() {
        let manifest = Manifest::new(vec![name("guide"), titled("guide", "The Guide")]);
        assert_eq!(manifest.position("guide"), Some(0));
        assert_eq!(manifest.title_for("guide"), Some("guide"));

        let manifest = Manifest::new(vec![titled("guide", "The Guide"), name("guide")]);
        assert_eq!(manifest.title_for("guide"), Some("The Guide"));
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(Manifest::load(temp_dir.path(), "_order.yml").unwrap().is_none());
    }

    #[test]
    fn test_load_reads_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("_order.yml"), "- b\n- a\n").unwrap();

        let manifest = Manifest::load(temp_dir.path(), "_order.yml").unwrap().unwrap();

        assert_eq!(manifest.entries(), &[name("b"), name("a")]);
    }

    #[test]
    fn test_load_invalid_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("_order.yml"), "title: nope\n").unwrap();

        let err = Manifest::load(temp_dir.path(), "_order.yml").unwrap_err();

        assert_eq!(err.kind(), TreeErrorKind::Manifest);
        assert!(err.path().unwrap().ends_with("_order.yml"));
        assert!(err.to_string().contains("expected a list"));
    }
}
