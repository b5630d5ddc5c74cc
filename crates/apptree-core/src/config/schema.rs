//! Schema for the project marker file (`config.json`).
//!
//! Field order here is the order written to disk.

use serde::{Deserialize, Serialize};

use crate::types::{ConfigVersion, DeploymentModel, Location};

/// The persisted identity of a local project.
///
/// Exported apps carry many more top-level keys; unknown keys are ignored on
/// read so that any exported `config.json` can be loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Scheme version of the config tree
    #[serde(default, skip_serializing_if = "ConfigVersion::is_zero")]
    pub config_version: ConfigVersion,

    /// Remote client app id, once known
    #[serde(
        rename = "client_app_id",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub app_id: String,

    /// App name
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Location::is_unset")]
    pub location: Location,

    #[serde(default, skip_serializing_if = "DeploymentModel::is_unset")]
    pub deployment_model: DeploymentModel,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub custom_user_data_config: CustomUserDataConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomUserDataConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub development_mode_enabled: bool,
}

impl ProjectConfig {
    /// Config for a freshly scaffolded app.
    pub fn scaffold(
        name: impl Into<String>,
        location: Location,
        deployment_model: DeploymentModel,
    ) -> Self {
        Self {
            config_version: ConfigVersion::DEFAULT,
            name: name.into(),
            location,
            deployment_model,
            ..Default::default()
        }
    }

    /// A directory holding this config is a managed project.
    pub fn is_project(&self) -> bool {
        !self.name.is_empty()
    }

    /// Selector used to look the app up remotely: client app id when known,
    /// otherwise the name.
    pub fn app_selector(&self) -> &str {
        if self.app_id.is_empty() {
            &self.name
        } else {
            &self.app_id
        }
    }
}
