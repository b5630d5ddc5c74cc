//! Writing archive entries to disk.

use std::path::{Component, Path, PathBuf};

use super::ArchiveEntry;
use crate::error::{Error, Result};

/// Whether `path` stays inside the directory it is joined onto.
pub fn is_safe_relative(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Write every entry under `target`, in archive order.
///
/// Missing parent directories are created and existing files overwritten.
/// The first failure aborts; files already written stay on disk. Returns the
/// written paths.
pub fn materialize(target: &Path, entries: &[ArchiveEntry]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(entries.len());

    for entry in entries {
        if !is_safe_relative(&entry.path) {
            return Err(Error::UnsafePath {
                path: entry.path.clone(),
            });
        }

        let out = target.join(&entry.path);
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io("failed to create directory", parent, e))?;
        }
        std::fs::write(&out, &entry.contents)
            .map_err(|e| Error::io("failed to write file", &out, e))?;

        written.push(out);
    }

    tracing::debug!(target = %target.display(), files = written.len(), "materialized archive");
    Ok(written)
}
