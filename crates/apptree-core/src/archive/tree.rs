//! Collecting a project directory into archive entries.

use std::path::{Path, PathBuf};

use super::ArchiveEntry;
use crate::error::{Error, Result};

/// Read every file under `root` as archive entries.
///
/// Entries are sorted by path so the result is deterministic. Hidden files
/// and directories (leading `.`) are skipped. Symlinks are an error.
pub fn collect_tree(root: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    collect_dir(root, Path::new(""), &mut entries)?;
    Ok(entries)
}

fn collect_dir(dir: &Path, rel: &Path, out: &mut Vec<ArchiveEntry>) -> Result<()> {
    let mut children = std::fs::read_dir(dir)
        .and_then(|rd| rd.collect::<std::io::Result<Vec<_>>>())
        .map_err(|e| Error::io("failed to read directory", dir, e))?;
    children.sort_by_key(|e| e.file_name());

    for child in children {
        let name = child.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = child.path();
        let rel_path: PathBuf = rel.join(&name);
        let ty = child
            .file_type()
            .map_err(|e| Error::io("failed to stat", &path, e))?;

        if ty.is_dir() {
            collect_dir(&path, &rel_path, out)?;
        } else if ty.is_file() {
            let contents =
                std::fs::read(&path).map_err(|e| Error::io("failed to read file", &path, e))?;
            out.push(ArchiveEntry {
                path: rel_path,
                contents,
            });
        } else {
            return Err(Error::io(
                "unsupported filesystem entry",
                &path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "symlinks and special files cannot be pushed",
                ),
            ));
        }
    }

    Ok(())
}
