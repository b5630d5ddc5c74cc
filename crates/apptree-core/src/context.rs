//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::client::{AppClient, HttpAppClient};
use crate::commands::{InitCommand, PullCommand, PushCommand};
use crate::config::Settings;
use crate::config::paths::default_settings_path;

/// Unified application context for dependency injection.
///
/// Frontends create this once per invocation and build commands from it.
#[derive(Debug, Clone)]
pub struct AppContext {
    working_dir: PathBuf,
    settings_path: Option<PathBuf>,
    settings: Settings,
}

impl AppContext {
    /// Load settings from `settings_path`, or the default location when `None`.
    pub fn load(working_dir: PathBuf, settings_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let settings_path = settings_path.or_else(default_settings_path);
        let settings = match &settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(Self::from_parts(working_dir, settings_path, settings))
    }

    /// Create context from already loaded settings (for testing).
    pub fn from_parts(
        working_dir: PathBuf,
        settings_path: Option<PathBuf>,
        settings: Settings,
    ) -> Self {
        Self {
            working_dir,
            settings_path,
            settings,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Project id from the flag, falling back to settings.
    pub fn project(&self, flag: Option<String>) -> Option<String> {
        flag.filter(|p| !p.is_empty())
            .or_else(|| self.settings.project.clone())
    }

    /// HTTP client for the admin API at the resolved base URL.
    pub fn http_client(&self, base_url_flag: Option<&str>) -> anyhow::Result<HttpAppClient> {
        let base_url = self.settings.base_url(base_url_flag)?;
        HttpAppClient::from_env(base_url).context("Failed to create admin API client")
    }

    pub fn init_command<'a>(&self, client: &'a dyn AppClient) -> InitCommand<'a> {
        InitCommand::new(self.working_dir.clone(), client)
            .with_defaults(self.settings.resolve_defaults())
    }

    pub fn pull_command<'a>(&self, client: &'a dyn AppClient) -> PullCommand<'a> {
        PullCommand::new(self.working_dir.clone(), client)
    }

    pub fn push_command<'a>(&self, client: &'a dyn AppClient) -> PushCommand<'a> {
        PushCommand::new(self.working_dir.clone(), client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn project_flag_beats_settings() {
        let settings = Settings {
            project: Some("from-settings".to_string()),
            ..Default::default()
        };
        let ctx = AppContext::from_parts(PathBuf::from("/work"), None, settings);

        assert_eq!(ctx.project(Some("from-flag".to_string())).as_deref(), Some("from-flag"));
        assert_eq!(ctx.project(None).as_deref(), Some("from-settings"));
        assert_eq!(ctx.project(Some(String::new())).as_deref(), Some("from-settings"));
    }

    #[test]
    fn load_reads_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "project = \"abc\"").unwrap();

        let ctx = AppContext::load(PathBuf::from("/work"), Some(file.path().to_path_buf())).unwrap();
        assert_eq!(ctx.settings().project.as_deref(), Some("abc"));
        assert_eq!(ctx.settings_path(), Some(file.path()));
        assert_eq!(ctx.working_dir(), Path::new("/work"));
    }

    #[test]
    fn load_rejects_broken_settings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [").unwrap();

        assert!(AppContext::load(PathBuf::from("/work"), Some(file.path().to_path_buf())).is_err());
    }
}
