//! Source specification types.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How a `from` value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FromType {
    /// A remote app, by client app id or name
    App,
    /// A named template
    Template,
}

impl FromType {
    pub const ALL: &'static [FromType] = &[FromType::App, FromType::Template];

    pub fn as_str(&self) -> &'static str {
        match self {
            FromType::App => "app",
            FromType::Template => "template",
        }
    }
}

impl fmt::Display for FromType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FromType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidValue {
                kind: "source type",
                value: s.to_string(),
                legal: Self::ALL.iter().map(|t| t.as_str()).collect(),
            })
    }
}

/// Decide how to treat a non-empty `from` value.
///
/// Every value names an app. Templates are only chosen through an explicit
/// [`FromType::Template`].
pub fn classify(_from: &str) -> FromType {
    FromType::App
}

/// Where a project's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    /// Write a fresh config
    Scaffold,
    /// Export an existing remote app
    ExistingApp { group_id: String, app_id: String },
    /// Instantiate a template
    Template { template_id: String },
}

impl SourceSelection {
    pub fn is_scaffold(&self) -> bool {
        matches!(self, Self::Scaffold)
    }

    /// Short label for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scaffold => "scaffold",
            Self::ExistingApp { .. } => "app",
            Self::Template { .. } => "template",
        }
    }
}
