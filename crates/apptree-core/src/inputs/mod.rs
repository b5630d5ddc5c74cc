//! Input resolution for init, pull and push.
//!
//! Explicit flags, the project found on disk and interactive answers are
//! merged into one [`ResolvedInputs`]. Precedence, highest first:
//!
//! 1. Explicit flags
//! 2. The existing project config (pull/push only; init refuses to run
//!    inside a project)
//! 3. Caller-supplied defaults (builtin or from settings)
//! 4. Interactive answers, asked at most once per field

pub mod prompt;

use std::path::{Path, PathBuf};

use crate::config::expand_home;
use crate::error::{Error, Result};
use crate::project::{ExistingProject, resolve_project};
use crate::source::{FromType, classify};
use crate::types::{ConfigVersion, DeploymentModel, Location};

pub use prompt::{NonInteractive, Prompt, Prompter};

/// Which command the inputs are resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a new project; fails inside an existing one
    Init,
    /// Export a remote app into a project
    Pull,
    /// Upload a project to a remote app
    Push,
}

/// Values supplied explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFlags {
    /// Cloud project (group) id
    pub project: Option<String>,
    /// App selector: client app id, name or id
    pub from: Option<String>,
    /// Force how `from` is interpreted
    pub from_type: Option<FromType>,
    pub name: Option<String>,
    pub location: Location,
    pub deployment_model: DeploymentModel,
    /// Target directory; `~` is expanded
    pub target: Option<String>,
    /// Requested config version; zero when not given
    pub app_version: ConfigVersion,
    pub include_dependencies: bool,
    pub include_hosting: bool,
    pub dry_run: bool,
}

impl InputFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_from_type(mut self, from_type: FromType) -> Self {
        self.from_type = Some(from_type);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_deployment_model(mut self, deployment_model: DeploymentModel) -> Self {
        self.deployment_model = deployment_model;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_app_version(mut self, version: ConfigVersion) -> Self {
        self.app_version = version;
        self
    }

    pub fn with_include_dependencies(mut self, include: bool) -> Self {
        self.include_dependencies = include;
        self
    }

    pub fn with_include_hosting(mut self, include: bool) -> Self {
        self.include_hosting = include;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The target flag, home-expanded and anchored at `working_dir`.
    fn explicit_target(&self, working_dir: &Path) -> Result<Option<PathBuf>> {
        let Some(target) = self.target.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        Ok(Some(working_dir.join(expand_home(target)?)))
    }
}

/// Fully merged inputs for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub operation: Operation,
    pub project: String,
    pub from: String,
    /// `None` means initialize from an empty scaffold
    pub from_type: Option<FromType>,
    pub name: String,
    pub location: Location,
    pub deployment_model: DeploymentModel,
    pub target: PathBuf,
    pub app_version: ConfigVersion,
    /// Directory of the project found on disk, if any
    pub project_dir: Option<PathBuf>,
    pub include_dependencies: bool,
    pub include_hosting: bool,
    pub dry_run: bool,
}

/// Fallbacks for init fields the user did not set.
///
/// `None` means there is no default and the user is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveDefaults {
    pub location: Option<Location>,
    pub deployment_model: Option<DeploymentModel>,
}

impl Default for ResolveDefaults {
    fn default() -> Self {
        Self {
            location: Some(Location::Virginia),
            deployment_model: Some(DeploymentModel::Global),
        }
    }
}

impl ResolveDefaults {
    /// No defaults: unset location and deployment model are prompted.
    pub fn prompt() -> Self {
        Self {
            location: None,
            deployment_model: None,
        }
    }
}

/// Merges flags, on-disk state and prompt answers.
pub struct InputResolver<'p> {
    working_dir: PathBuf,
    defaults: ResolveDefaults,
    prompter: &'p mut dyn Prompter,
}

impl<'p> InputResolver<'p> {
    pub fn new(working_dir: impl Into<PathBuf>, prompter: &'p mut dyn Prompter) -> Self {
        Self {
            working_dir: working_dir.into(),
            defaults: ResolveDefaults::default(),
            prompter,
        }
    }

    pub fn with_defaults(mut self, defaults: ResolveDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Discover the project around the target (or working directory) and
    /// resolve inputs against it.
    pub fn resolve(&mut self, operation: Operation, flags: InputFlags) -> Result<ResolvedInputs> {
        let search_from = flags
            .explicit_target(&self.working_dir)?
            .unwrap_or_else(|| self.working_dir.clone());
        let existing = resolve_project(&search_from)?;
        self.resolve_with_project(operation, flags, existing)
    }

    /// Resolve inputs against an already discovered project.
    pub fn resolve_with_project(
        &mut self,
        operation: Operation,
        flags: InputFlags,
        existing: Option<ExistingProject>,
    ) -> Result<ResolvedInputs> {
        match operation {
            Operation::Init => self.resolve_init(flags, existing),
            Operation::Pull | Operation::Push => {
                Self::resolve_sync(operation, flags, existing, &self.working_dir)
            }
        }
    }

    fn resolve_init(
        &mut self,
        flags: InputFlags,
        existing: Option<ExistingProject>,
    ) -> Result<ResolvedInputs> {
        if let Some(project) = existing.as_ref().filter(|p| p.is_project()) {
            return Err(Error::ProjectExists {
                dir: project.dir.clone(),
            });
        }

        // A nameless marker is not a project and never redirects the target.
        let target = flags
            .explicit_target(&self.working_dir)?
            .unwrap_or_else(|| self.working_dir.clone());

        let from = flags.from.clone().unwrap_or_default();
        let from_type = flags
            .from_type
            .or_else(|| (!from.is_empty()).then(|| classify(&from)));

        let mut inputs = ResolvedInputs {
            operation: Operation::Init,
            project: flags.project.clone().unwrap_or_default(),
            from,
            from_type,
            name: flags.name.clone().unwrap_or_default(),
            location: flags.location,
            deployment_model: flags.deployment_model,
            target,
            app_version: flags.app_version,
            project_dir: None,
            include_dependencies: flags.include_dependencies,
            include_hosting: flags.include_hosting,
            dry_run: flags.dry_run,
        };

        if let Some(from_type) = inputs.from_type {
            tracing::debug!(from = %inputs.from, ?from_type, "initializing from a source, skipping prompts");
            return Ok(inputs);
        }

        if inputs.name.is_empty() {
            inputs.name = self.ask_name()?;
        }
        if inputs.location.is_unset() {
            inputs.location = match self.defaults.location {
                Some(location) => location,
                None => self.ask_choice::<Location>("App Location")?,
            };
        }
        if inputs.deployment_model.is_unset() {
            inputs.deployment_model = match self.defaults.deployment_model {
                Some(model) => model,
                None => self.ask_choice::<DeploymentModel>("App Deployment Model")?,
            };
        }

        Ok(inputs)
    }

    fn resolve_sync(
        operation: Operation,
        flags: InputFlags,
        existing: Option<ExistingProject>,
        working_dir: &Path,
    ) -> Result<ResolvedInputs> {
        let existing = existing.filter(ExistingProject::is_project);
        let target = match (flags.explicit_target(working_dir)?, existing.as_ref()) {
            (Some(target), _) => target,
            (None, Some(project)) => project.dir.clone(),
            (None, None) => {
                return Err(Error::ProjectNotFound {
                    start: working_dir.to_path_buf(),
                });
            }
        };

        let mut inputs = ResolvedInputs {
            operation,
            project: flags.project.clone().unwrap_or_default(),
            from: flags.from.clone().unwrap_or_default(),
            from_type: Some(FromType::App),
            name: flags.name.clone().unwrap_or_default(),
            location: flags.location,
            deployment_model: flags.deployment_model,
            target,
            app_version: flags.app_version,
            project_dir: None,
            include_dependencies: flags.include_dependencies,
            include_hosting: flags.include_hosting,
            dry_run: flags.dry_run,
        };

        if let Some(project) = existing {
            inputs.app_version = reconcile_version(project.config.config_version, flags.app_version)?;
            if inputs.from.is_empty() {
                inputs.from = project.config.app_selector().to_string();
            }
            if inputs.name.is_empty() {
                inputs.name = project.config.name.clone();
            }
            inputs.location = inputs.location.or(project.config.location);
            inputs.deployment_model = inputs.deployment_model.or(project.config.deployment_model);
            inputs.project_dir = Some(project.dir);
        }

        tracing::debug!(
            ?operation,
            target = %inputs.target.display(),
            version = %inputs.app_version,
            from = %inputs.from,
            "resolved inputs"
        );
        Ok(inputs)
    }

    fn ask_name(&mut self) -> Result<String> {
        let answer = self
            .prompter
            .ask(&Prompt::Input { message: "App Name" })
            .map_err(Error::Prompt)?;
        let name = answer.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(name.to_string())
    }

    fn ask_choice<T: Choice>(&mut self, message: &str) -> Result<T> {
        let options: Vec<String> = T::legal().into_iter().map(String::from).collect();
        let answer = self
            .prompter
            .ask(&Prompt::Select {
                message,
                options: &options,
                default: 0,
            })
            .map_err(Error::Prompt)?;
        T::parse_required(&answer)
    }
}

/// Pick the config version for pull/push from the local and requested one.
///
/// Both set and different is a conflict; otherwise whichever is set wins.
pub fn reconcile_version(local: ConfigVersion, requested: ConfigVersion) -> Result<ConfigVersion> {
    match (local.is_zero(), requested.is_zero()) {
        (_, true) => Ok(local),
        (true, false) => Ok(requested),
        (false, false) if local == requested => Ok(local),
        (false, false) => Err(Error::VersionMismatch { local, requested }),
    }
}

/// Enumerations offered as single-choice prompts.
trait Choice: Sized {
    fn legal() -> Vec<&'static str>;
    fn parse_required(answer: &str) -> Result<Self>;
}

macro_rules! impl_choice {
    ($ty:ty, $kind:literal) => {
        impl Choice for $ty {
            fn legal() -> Vec<&'static str> {
                <$ty>::legal_values()
            }

            fn parse_required(answer: &str) -> Result<Self> {
                let value: $ty = answer.parse()?;
                if value.is_unset() {
                    return Err(Error::InvalidValue {
                        kind: $kind,
                        value: answer.to_string(),
                        legal: Self::legal(),
                    });
                }
                Ok(value)
            }
        }
    };
}

impl_choice!(Location, "location");
impl_choice!(DeploymentModel, "deployment model");
