//! Tree compilation error types.
//!
//! Follows a kind + path + source layout so callers can match on the
//! category while the message keeps the full context.

use std::path::{Path, PathBuf};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeErrorKind {
    /// Path does not exist.
    NotFound,
    /// Path exists but is not a directory.
    NotADirectory,
    /// Manifest could not be parsed.
    Manifest,
    /// Document is not valid UTF-8.
    Encoding,
    /// Bundle serialization failed.
    Serialize,
    /// Other I/O failure.
    Io,
}

/// Error raised while compiling or writing a documentation tree.
#[derive(Debug)]
pub struct TreeError {
    kind: TreeErrorKind,
    path: Option<PathBuf>,
    source: Option<BoxError>,
}

impl TreeError {
    /// Create a new error of the given kind.
    #[must_use]
    pub fn new(kind: TreeErrorKind) -> Self {
        Self {
            kind,
            path: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Error category.
    #[must_use]
    pub fn kind(&self) -> TreeErrorKind {
        self.kind
    }

    /// Path the error relates to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create an error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => TreeErrorKind::NotFound,
            std::io::ErrorKind::InvalidData => TreeErrorKind::Encoding,
            _ => TreeErrorKind::Io,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: message (path: /foo/bar)"
        let kind_str = match self.kind {
            TreeErrorKind::NotFound => "Not found",
            TreeErrorKind::NotADirectory => "Not a directory",
            TreeErrorKind::Manifest => "Invalid manifest",
            TreeErrorKind::Encoding => "Invalid encoding",
            TreeErrorKind::Serialize => "Serialization failed",
            TreeErrorKind::Io => "I/O error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_path() {
        let err = TreeError::new(TreeErrorKind::NotFound).with_path("/docs/guide");
        assert_eq!(err.to_string(), "Not found (path: /docs/guide)");
    }

    #[test]
    fn test_display_with_source_and_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TreeError::io(io, "/docs/intro.md");
        assert_eq!(err.kind(), TreeErrorKind::Io);
        assert_eq!(err.to_string(), "I/O error: denied (path: /docs/intro.md)");
    }

    #[test]
    fn test_io_kind_mapping() {
        let err = TreeError::io(std::io::Error::from(std::io::ErrorKind::NotFound), "/x");
        assert_eq!(err.kind(), TreeErrorKind::NotFound);

        let err = TreeError::io(std::io::Error::from(std::io::ErrorKind::InvalidData), "/x");
        assert_eq!(err.kind(), TreeErrorKind::Encoding);
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error as _;

        let err = TreeError::io(std::io::Error::other("boom"), "/x");
        assert!(err.source().is_some());
        assert!(TreeError::new(TreeErrorKind::NotFound).source().is_none());
    }
}
