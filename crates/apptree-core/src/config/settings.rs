//! User settings (`~/.config/apptree/config.toml`) with helpful parse errors.
//!
//! Precedence for every value is: CLI flag, then this file, then the builtin
//! default.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::inputs::ResolveDefaults;
use crate::types::{DeploymentModel, Location};

/// Base URL of the admin API when neither flag nor settings provide one.
pub const DEFAULT_BASE_URL: &str = "https://realm.mongodb.com";

/// Root structure of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Admin API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Default cloud project (group) id
    #[serde(default)]
    pub project: Option<String>,

    /// Defaults applied during init
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsSettings {
    #[serde(default, skip_serializing_if = "Location::is_unset")]
    pub location: Location,

    #[serde(default, skip_serializing_if = "DeploymentModel::is_unset")]
    pub deployment_model: DeploymentModel,

    /// Ask for location and deployment model instead of using defaults
    #[serde(default)]
    pub prompt_for_defaults: bool,
}

impl Settings {
    /// Load settings, returning defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        parse_settings(path)
    }

    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            Url::parse(base_url).with_context(|| format!("Invalid base_url: {}", base_url))?;
        }
        Ok(())
    }

    /// Resolve the admin API base URL, preferring an explicit override.
    pub fn base_url(&self, flag: Option<&str>) -> Result<Url> {
        let raw = flag
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).with_context(|| format!("Invalid base URL: {}", raw))
    }

    /// Defaults handed to the input resolver for init.
    pub fn resolve_defaults(&self) -> ResolveDefaults {
        if self.defaults.prompt_for_defaults {
            return ResolveDefaults::prompt();
        }
        let builtin = ResolveDefaults::default();
        ResolveDefaults {
            location: Some(self.defaults.location.or(builtin.location.unwrap_or_default())),
            deployment_model: Some(
                self.defaults
                    .deployment_model
                    .or(builtin.deployment_model.unwrap_or_default()),
            ),
        }
    }
}

/// Parse a settings file with detailed error messages.
pub fn parse_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    parse_settings_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

/// Parse settings content from a string.
pub fn parse_settings_str(content: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;
    settings.validate()?;
    Ok(settings)
}

/// Serialize settings to a TOML string.
pub fn to_toml(settings: &Settings) -> Result<String> {
    toml::to_string_pretty(settings).with_context(|| "Failed to serialize settings to TOML")
}

fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let error_msg = error.to_string();

    let line_hint = error
        .span()
        .map(|span| content[..span.start.min(content.len())].lines().count().max(1));

    match line_hint {
        Some(line_num) => anyhow::anyhow!(
            "TOML parsing error at line {}:\n{}\n\nError: {}",
            line_num,
            get_line_context(content, line_num),
            error_msg
        ),
        None => anyhow::anyhow!("TOML parsing error: {}", error_msg),
    }
}

fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 2).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
