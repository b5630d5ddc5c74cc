//! Init command implementation.
//!
//! Creates a new project: either a fresh scaffold config or the unpacked
//! export of an existing remote app.

use std::path::PathBuf;

use serde::Serialize;

use crate::archive::{materialize, read_zip};
use crate::client::{AppClient, ExportRequest};
use crate::config::{ProjectConfig, project_config_path, write_config};
use crate::error::{Error, Result};
use crate::inputs::{InputFlags, InputResolver, Operation, Prompter, ResolveDefaults};
use crate::source::{SourceSelection, select_source};

/// Result of a successful init.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// App name written to the project config; empty when copied from an app
    pub name: String,
    /// Directory the project was created in
    pub target: PathBuf,
    /// `scaffold` or `app`
    pub source: &'static str,
    /// Files written, in order
    pub files: Vec<PathBuf>,
}

/// Init command orchestrator
pub struct InitCommand<'a> {
    working_dir: PathBuf,
    defaults: ResolveDefaults,
    client: &'a dyn AppClient,
}

impl<'a> InitCommand<'a> {
    pub fn new(working_dir: impl Into<PathBuf>, client: &'a dyn AppClient) -> Self {
        Self {
            working_dir: working_dir.into(),
            defaults: ResolveDefaults::default(),
            client,
        }
    }

    /// Override the builtin location and deployment model defaults.
    pub fn with_defaults(mut self, defaults: ResolveDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn execute(&self, flags: InputFlags, prompter: &mut dyn Prompter) -> Result<InitReport> {
        let inputs = InputResolver::new(&self.working_dir, &mut *prompter)
            .with_defaults(self.defaults)
            .resolve(Operation::Init, flags)?;

        let source = select_source(&inputs, self.client, prompter)?;
        let files = match &source {
            SourceSelection::Scaffold => {
                let config = ProjectConfig::scaffold(
                    &inputs.name,
                    inputs.location,
                    inputs.deployment_model,
                );
                let path = project_config_path(&inputs.target);
                write_config(&path, &config)?;
                vec![path]
            }
            SourceSelection::ExistingApp { group_id, app_id } => {
                let request = ExportRequest {
                    config_version: inputs.app_version,
                    is_templated: true,
                    ..Default::default()
                };
                let export = self.client.export(group_id, app_id, &request)?;
                tracing::debug!(file = %export.file_name, bytes = export.archive.len(), "downloaded export");
                materialize(&inputs.target, &read_zip(&export.archive)?)?
            }
            SourceSelection::Template { template_id } => {
                tracing::debug!(template = %template_id, "template requested");
                return Err(Error::TemplateUnsupported);
            }
        };

        tracing::info!(
            target_dir = %inputs.target.display(),
            source = source.kind(),
            files = files.len(),
            "initialized app"
        );

        Ok(InitReport {
            name: inputs.name,
            target: inputs.target,
            source: source.kind(),
            files,
        })
    }
}
