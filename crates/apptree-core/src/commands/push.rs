//! Push command implementation.
//!
//! Zips the local project tree and imports it into the remote app.

use std::path::PathBuf;

use serde::Serialize;

use crate::archive::{collect_tree, write_zip};
use crate::client::{AppClient, AppFilter, ImportRequest, find_app};
use crate::error::{Error, Result};
use crate::inputs::{InputFlags, InputResolver, Operation, Prompter};

/// Result of a push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushReport {
    pub app_name: String,
    pub client_app_id: String,
    pub target: PathBuf,
    /// Archive paths included in the upload
    pub files: Vec<PathBuf>,
    /// Size of the uploaded archive
    pub bytes: usize,
    pub dry_run: bool,
}

/// Push command orchestrator
pub struct PushCommand<'a> {
    working_dir: PathBuf,
    client: &'a dyn AppClient,
}

impl<'a> PushCommand<'a> {
    pub fn new(working_dir: impl Into<PathBuf>, client: &'a dyn AppClient) -> Self {
        Self {
            working_dir: working_dir.into(),
            client,
        }
    }

    pub fn execute(&self, flags: InputFlags, prompter: &mut dyn Prompter) -> Result<PushReport> {
        let inputs = InputResolver::new(&self.working_dir, &mut *prompter)
            .resolve(Operation::Push, flags)?;
        if inputs.project_dir.is_none() {
            return Err(Error::ProjectNotFound {
                start: inputs.target.clone(),
            });
        }

        let app = find_app(
            self.client,
            &AppFilter::new(&inputs.project, &inputs.from),
            prompter,
        )?;

        let entries = collect_tree(&inputs.target)?;
        let archive = write_zip(&entries)?;

        if inputs.dry_run {
            tracing::info!(app = %app.client_app_id, bytes = archive.len(), "dry run, not importing");
        } else {
            let request = ImportRequest {
                include_dependencies: inputs.include_dependencies,
                include_hosting: inputs.include_hosting,
            };
            self.client.import(&app.group_id, &app.id, &archive, &request)?;
            tracing::info!(
                app = %app.client_app_id,
                files = entries.len(),
                bytes = archive.len(),
                "pushed app"
            );
        }

        Ok(PushReport {
            app_name: app.name,
            client_app_id: app.client_app_id,
            target: inputs.target,
            files: entries.into_iter().map(|e| e.path).collect(),
            bytes: archive.len(),
            dry_run: inputs.dry_run,
        })
    }
}
