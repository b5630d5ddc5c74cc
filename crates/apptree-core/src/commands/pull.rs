//! Pull command implementation.
//!
//! Exports a remote app and writes its config tree into the local project.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive::{ArchiveEntry, find_entry, materialize, read_zip};
use crate::client::{App, AppClient, AppFilter, ExportRequest, find_app};
use crate::config::{PROJECT_CONFIG_FILE, parse_config_str};
use crate::error::{Error, Result};
use crate::inputs::{InputFlags, InputResolver, Operation, Prompter, ResolvedInputs};
use crate::source::resolve_app_or_group;
use crate::types::ConfigVersion;

/// Result of a pull.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullReport {
    pub app_name: String,
    pub client_app_id: String,
    pub target: PathBuf,
    /// Config version of the exported tree; zero if the archive has none
    pub config_version: u32,
    /// Files written, or that would be written on a dry run
    pub files: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Pull command orchestrator
pub struct PullCommand<'a> {
    working_dir: PathBuf,
    client: &'a dyn AppClient,
}

impl<'a> PullCommand<'a> {
    pub fn new(working_dir: impl Into<PathBuf>, client: &'a dyn AppClient) -> Self {
        Self {
            working_dir: working_dir.into(),
            client,
        }
    }

    pub fn execute(&self, flags: InputFlags, prompter: &mut dyn Prompter) -> Result<PullReport> {
        let inputs = InputResolver::new(&self.working_dir, &mut *prompter)
            .resolve(Operation::Pull, flags)?;

        let app = self.resolve_app(&inputs, prompter)?;
        tracing::debug!(app = %app.client_app_id, group = %app.group_id, "pulling app");

        let request = ExportRequest {
            config_version: inputs.app_version,
            is_templated: false,
            include_dependencies: inputs.include_dependencies,
            include_hosting: inputs.include_hosting,
        };
        let export = self.client.export(&app.group_id, &app.id, &request)?;
        let entries = read_zip(&export.archive)?;

        let exported = exported_version(&entries)?;
        if !inputs.app_version.is_zero() && !exported.is_zero() && exported != inputs.app_version {
            return Err(Error::ExportVersionMismatch {
                requested: inputs.app_version,
                exported,
            });
        }

        let files = if inputs.dry_run {
            tracing::info!(target_dir = %inputs.target.display(), "dry run, not writing files");
            planned_paths(&inputs.target, &entries)
        } else {
            let written = materialize(&inputs.target, &entries)?;
            tracing::info!(
                target_dir = %inputs.target.display(),
                files = written.len(),
                "pulled app"
            );
            written
        };

        Ok(PullReport {
            app_name: app.name,
            client_app_id: app.client_app_id,
            target: inputs.target,
            config_version: exported.0,
            files,
            dry_run: inputs.dry_run,
        })
    }

    /// Find the app to pull, falling back to choosing from the whole project
    /// when the selector matches nothing.
    fn resolve_app(&self, inputs: &ResolvedInputs, prompter: &mut dyn Prompter) -> Result<App> {
        let filter = AppFilter::new(&inputs.project, &inputs.from);
        if let Some(app) = resolve_app_or_group(self.client, &filter, prompter)? {
            return Ok(app);
        }
        if filter.app.is_empty() {
            return Err(Error::AppNotFound {
                selector: inputs.project.clone(),
            });
        }

        tracing::info!(selector = %filter.app, "no app matched, choosing from project");
        find_app(self.client, &AppFilter::new(&inputs.project, ""), prompter)
    }
}

/// Config version recorded in the archive's root `config.json`.
fn exported_version(entries: &[ArchiveEntry]) -> Result<ConfigVersion> {
    let path = Path::new(PROJECT_CONFIG_FILE);
    let Some(entry) = find_entry(entries, path) else {
        return Ok(ConfigVersion::ZERO);
    };

    let content = String::from_utf8_lossy(&entry.contents);
    let config = parse_config_str(&content).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.config_version)
}

fn planned_paths(target: &Path, entries: &[ArchiveEntry]) -> Vec<PathBuf> {
    entries.iter().map(|e| target.join(&e.path)).collect()
}
