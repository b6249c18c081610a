//! Directory listing for tree compilation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TreeError;

/// One child of a directory being compiled.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// File name including extension (e.g. "intro.md").
    pub file_name: String,
    /// Name used for manifest matching and the node name:
    /// file stem for files, full name for directories.
    pub name: String,
    /// Extension without the dot, for files.
    pub extension: Option<String>,
    /// True for directories (symlinks are not followed).
    pub is_dir: bool,
}

/// List the visible entries of `dir` in lexicographic name order.
///
/// Names are compared without their extension, so `a.md` precedes `a-b.md`;
/// the full file name breaks ties. Hidden entries (leading `.`) are skipped.
pub(crate) fn list_entries(dir: &Path) -> Result<Vec<Entry>, TreeError> {
    let read_dir = fs::read_dir(dir).map_err(|e| TreeError::io(e, dir))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| TreeError::io(e, dir))?;
        let file_name = dir_entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        let path = dir_entry.path();
        let is_dir = dir_entry
            .file_type()
            .map_err(|e| TreeError::io(e, &path))?
            .is_dir();

        let (name, extension) = if is_dir {
            (file_name.clone(), None)
        } else {
            split_extension(&file_name)
        };

        entries.push(Entry {
            path,
            file_name,
            name,
            extension,
            is_dir,
        });
    }

    entries.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    Ok(entries)
}

/// Split `intro.md` into `("intro", Some("md"))`.
fn split_extension(file_name: &str) -> (String, Option<String>) {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map_or_else(|| file_name.to_owned(), |s| s.to_string_lossy().into_owned());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned());
    (stem, extension)
}
