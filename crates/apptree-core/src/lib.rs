//! apptree Core Library
//!
//! Project resolution and initialization for app config trees: finding the
//! project on disk, merging flags with prompts and on-disk state, and
//! writing scaffolds or exported archives.

pub mod archive;
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod inputs;
pub mod project;
pub mod source;
pub mod types;

pub use error::{Error, ErrorKind, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ProjectConfig, Settings};

    // Values
    pub use crate::types::{ConfigVersion, DeploymentModel, Location};

    // Resolution
    pub use crate::inputs::{
        InputFlags, InputResolver, NonInteractive, Operation, Prompt, Prompter, ResolveDefaults,
        ResolvedInputs,
    };
    pub use crate::project::{ExistingProject, resolve_project, resolve_project_directory};
    pub use crate::source::{FromType, SourceSelection};

    // Remote
    pub use crate::client::{
        App, AppClient, AppFilter, Export, ExportRequest, HttpAppClient, ImportRequest,
    };

    // Archives
    pub use crate::archive::ArchiveEntry;

    // Commands
    pub use crate::commands::{
        InitCommand, InitReport, PullCommand, PullReport, PushCommand, PushReport,
    };
    pub use crate::context::AppContext;

    pub use crate::error::{Error, ErrorKind, Result};
}
