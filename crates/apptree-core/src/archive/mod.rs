//! App archives: the ordered set of files that makes up an app's config tree.
//!
//! Exports arrive as zip bytes, are decoded into [`ArchiveEntry`] values and
//! written under the target directory. Push goes the other way: the project
//! tree is collected and zipped.

mod bundle;
mod materialize;
mod tree;

use std::path::{Path, PathBuf};

pub use bundle::{read_zip, write_zip};
pub use materialize::{is_safe_relative, materialize};
pub use tree::collect_tree;

/// One file in an app archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path relative to the archive root
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Find the entry at `path` (relative to the archive root).
pub fn find_entry<'a>(entries: &'a [ArchiveEntry], path: &Path) -> Option<&'a ArchiveEntry> {
    entries.iter().find(|entry| entry.path == path)
}
