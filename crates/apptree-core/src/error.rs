//! Error types for project resolution and initialization.
//!
//! Every failure the engine can produce is a variant of [`Error`], so callers
//! can match on the condition instead of the message text (for example, pull
//! tolerates [`Error::AppNotFound`] when it can fall back to the group).

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConfigVersion;

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing user input: invalid enum values, conflicting flags,
    /// prompts that could not be answered.
    Validation,
    /// The filesystem is not in the state the operation needs.
    State,
    /// A recognized capability that is not implemented yet.
    Unsupported,
    /// Local filesystem failure.
    Io,
    /// Failure reported by the remote app client.
    Remote,
}

/// Errors from project resolution, initialization and materialization.
#[derive(Debug, Error)]
pub enum Error {
    #[error("a project already exists at {}", .dir.display())]
    ProjectExists { dir: PathBuf },

    #[error("no project found in {} or any of its parent directories", .start.display())]
    ProjectNotFound { start: PathBuf },

    #[error(
        "must export an app with the same config version as found in the current project directory (project: {local}, requested: {requested})"
    )]
    VersionMismatch {
        local: ConfigVersion,
        requested: ConfigVersion,
    },

    #[error("exported app has config version {exported}, expected {requested}")]
    ExportVersionMismatch {
        requested: ConfigVersion,
        exported: ConfigVersion,
    },

    #[error("initializing from templates is not yet supported")]
    TemplateUnsupported,

    #[error("unsupported {kind} '{value}', use one of [{}] instead", .legal.join(", "))]
    InvalidValue {
        kind: &'static str,
        value: String,
        legal: Vec<&'static str>,
    },

    #[error("app name must not be empty")]
    EmptyName,

    #[error("no app found matching '{selector}'")]
    AppNotFound { selector: String },

    #[error("failed to read app data at {}", .path.display())]
    EmptyConfig { path: PathBuf },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize project config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("refusing to write archive entry outside the target directory: {}", .path.display())]
    UnsafePath { path: PathBuf },

    #[error("cannot expand home directory in '{path}'")]
    HomeExpansion { path: String },

    #[error("{action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to process archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Prompt(anyhow::Error),

    #[error(transparent)]
    Remote(anyhow::Error),
}

impl Error {
    /// Build an [`Error::Io`] tagged with the path it concerns.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Classify the error for callers that pick fallback behavior.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidValue { .. }
            | Error::VersionMismatch { .. }
            | Error::ExportVersionMismatch { .. }
            | Error::EmptyName
            | Error::Prompt(_) => ErrorKind::Validation,
            Error::ProjectExists { .. }
            | Error::ProjectNotFound { .. }
            | Error::EmptyConfig { .. }
            | Error::ParseConfig { .. }
            | Error::UnsafePath { .. }
            | Error::HomeExpansion { .. } => ErrorKind::State,
            Error::TemplateUnsupported => ErrorKind::Unsupported,
            Error::Io { .. } | Error::Archive(_) | Error::Serialize(_) => ErrorKind::Io,
            Error::AppNotFound { .. } | Error::Remote(_) => ErrorKind::Remote,
        }
    }

    /// True when a remote lookup matched nothing.
    pub fn is_app_not_found(&self) -> bool {
        matches!(self, Error::AppNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_lists_every_choice() {
        let err = Error::InvalidValue {
            kind: "deployment model",
            value: "REGIONAL".to_string(),
            legal: vec!["GLOBAL", "LOCAL"],
        };

        assert_eq!(
            err.to_string(),
            "unsupported deployment model 'REGIONAL', use one of [GLOBAL, LOCAL] instead"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn empty_config_message_names_the_path() {
        let err = Error::EmptyConfig {
            path: PathBuf::from("/tmp/app/config.json"),
        };
        assert_eq!(err.to_string(), "failed to read app data at /tmp/app/config.json");
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn unanswered_prompt_is_missing_input() {
        let err = Error::Prompt(anyhow::anyhow!("cannot prompt for 'App Name'"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn export_version_mismatch_names_both_sides() {
        let err = Error::ExportVersionMismatch {
            requested: ConfigVersion(20180301),
            exported: ConfigVersion(20200603),
        };
        assert_eq!(
            err.to_string(),
            "exported app has config version 20200603, expected 20180301"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn app_not_found_is_a_remote_condition() {
        let err = Error::AppNotFound {
            selector: "todo".to_string(),
        };
        assert!(err.is_app_not_found());
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert!(!Error::TemplateUnsupported.is_app_not_found());
    }
}
