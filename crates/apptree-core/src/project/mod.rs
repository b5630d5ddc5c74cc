//! Locating existing projects on disk.
//!
//! A directory is a project when it contains the marker `config.json` and the
//! config inside has a non-empty name. Discovery walks upward from a starting
//! directory, so commands work from any subdirectory of a project.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::config::{ProjectConfig, decode_config, project_config_path, read_config_bytes};
use crate::error::{Error, Result};

/// Maximum number of parent hops taken when searching for the marker file.
pub const MAX_SEARCH_DEPTH: usize = 8;

/// A project discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingProject {
    /// Directory containing the marker file
    pub dir: PathBuf,
    /// Parsed marker file
    pub config: ProjectConfig,
}

impl ExistingProject {
    /// Whether the marker file names an app.
    pub fn is_project(&self) -> bool {
        self.config.is_project()
    }
}

/// Search upward from `start` for the directory holding the marker file.
///
/// Checks `start` and then at most [`MAX_SEARCH_DEPTH`] ancestors, stopping
/// early at the filesystem root. Not finding a project is `Ok(None)`.
pub fn resolve_project_directory(start: &Path) -> Result<Option<PathBuf>> {
    let mut dir = std::path::absolute(start)
        .map(|p| clean(&p))
        .map_err(|e| Error::io("failed to resolve absolute path", start, e))?;

    for _ in 0..=MAX_SEARCH_DEPTH {
        if project_config_path(&dir).is_file() {
            tracing::debug!(dir = %dir.display(), "found project directory");
            return Ok(Some(dir));
        }

        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => break,
        }
    }

    Ok(None)
}

/// Lexically resolve `.` and `..` components.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// The fields that decide whether a marker file belongs to a project.
#[derive(Debug, Default, Deserialize)]
struct MarkerIdentity {
    #[serde(default)]
    name: String,
    #[serde(default)]
    client_app_id: String,
}

/// Find and read the project containing `start`, if any.
///
/// Only a marker naming an app is parsed in full. A nameless `config.json`
/// may belong to anything else, so its other fields are never validated.
pub fn resolve_project(start: &Path) -> Result<Option<ExistingProject>> {
    let Some(dir) = resolve_project_directory(start)? else {
        return Ok(None);
    };

    let path = project_config_path(&dir);
    let data = read_config_bytes(&path)?;
    let identity: MarkerIdentity = decode_config(&path, &data)?;

    let config = if identity.name.is_empty() {
        tracing::debug!(path = %path.display(), "marker file has no app name");
        ProjectConfig {
            app_id: identity.client_app_id,
            ..Default::default()
        }
    } else {
        decode_config(&path, &data)?
    };
    Ok(Some(ExistingProject { dir, config }))
}
