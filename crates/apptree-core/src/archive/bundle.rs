//! Zip encoding of app archives.

use std::io::{Cursor, Read, Write};
use std::path::{Component, Path};

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::ArchiveEntry;
use crate::error::{Error, Result};

/// Upper bound on the buffer preallocated from an entry's declared size.
const PREALLOCATE_LIMIT: u64 = 1 << 20;

/// Decode zip bytes into entries, in archive order.
///
/// Directory entries are skipped, as are entries whose names would escape
/// the archive root.
pub fn read_zip(data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let Some(path) = file.enclosed_name() else {
            tracing::warn!(name = file.name(), "skipping archive entry with unsafe path");
            continue;
        };

        // The declared size comes from the archive and may be bogus.
        let mut contents = Vec::with_capacity(file.size().min(PREALLOCATE_LIMIT) as usize);
        file.read_to_end(&mut contents)
            .map_err(|e| Error::io("failed to read archive entry", &path, e))?;

        entries.push(ArchiveEntry { path, contents });
    }

    Ok(entries)
}

/// Encode entries as zip bytes, preserving their order.
pub fn write_zip(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for entry in entries {
        zip.start_file(zip_name(&entry.path), options)?;
        zip.write_all(&entry.contents)
            .map_err(|e| Error::io("failed to write archive entry", &entry.path, e))?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Zip member names always use `/` separators.
fn zip_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
