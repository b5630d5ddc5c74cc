//! Path helpers for project and settings files.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Marker file identifying a project root.
pub const PROJECT_CONFIG_FILE: &str = "config.json";

/// Settings file name inside the user config directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "apptree";

pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_CONFIG_FILE)
}

/// Default location of the user settings file.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join(SETTINGS_FILE))
}

/// Expand a leading `~` to the current user's home directory.
///
/// `~user/...` forms are rejected since only the current user's home is known.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" || path.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| Error::HomeExpansion {
            path: path.to_string(),
        })?;
        let rest = path.strip_prefix("~/").unwrap_or("");
        return Ok(if rest.is_empty() { home } else { home.join(rest) });
    }

    if path.starts_with('~') {
        return Err(Error::HomeExpansion {
            path: path.to_string(),
        });
    }

    Ok(PathBuf::from(path))
}
