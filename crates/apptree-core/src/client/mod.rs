//! Remote app client contract.
//!
//! The engine only needs three things from the admin API: list apps matching
//! a filter, export an app as a zip archive, and import a zip archive into an
//! app. [`AppClient`] captures that; [`http::HttpAppClient`] talks to the real
//! service and tests provide in-memory fakes.

pub mod http;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inputs::{Prompt, Prompter};
use crate::types::ConfigVersion;

pub use http::HttpAppClient;

/// An app as reported by the admin API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub client_app_id: String,
    #[serde(default)]
    pub name: String,
}

impl App {
    /// Whether `selector` names this app by client app id, name or id.
    pub fn matches(&self, selector: &str) -> bool {
        selector.is_empty()
            || self.client_app_id == selector
            || self.name == selector
            || self.id == selector
    }

    /// Label shown when the user has to pick between several apps.
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.client_app_id)
    }
}

/// Narrows an app listing. An empty `app` matches every app in the group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppFilter {
    pub group_id: String,
    pub app: String,
}

impl AppFilter {
    pub fn new(group_id: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            app: app.into(),
        }
    }
}

/// Options for exporting an app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportRequest {
    /// Zero asks the server for its current version
    pub config_version: ConfigVersion,
    /// Strip environment-specific ids so the export can seed a new app
    pub is_templated: bool,
    pub include_dependencies: bool,
    pub include_hosting: bool,
}

/// Options for importing an archive into an app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportRequest {
    /// Install the dependencies listed in the archive
    pub include_dependencies: bool,
    /// Upload static hosting files along with the config
    pub include_hosting: bool,
}

/// A downloaded export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    /// Raw zip bytes
    pub archive: Vec<u8>,
}

/// Access to remote apps.
pub trait AppClient {
    /// List apps matching `filter`. An empty result is not an error here.
    fn find_apps(&self, filter: &AppFilter) -> Result<Vec<App>>;

    /// Export `app_id` in `group_id` as a zip archive.
    fn export(&self, group_id: &str, app_id: &str, request: &ExportRequest) -> Result<Export>;

    /// Replace the remote app's configuration with the zip in `archive`.
    fn import(
        &self,
        group_id: &str,
        app_id: &str,
        archive: &[u8],
        request: &ImportRequest,
    ) -> Result<()>;
}

/// Find exactly one app for `filter`.
///
/// No match is [`Error::AppNotFound`]; several matches are disambiguated by
/// asking the prompter.
pub fn find_app(
    client: &dyn AppClient,
    filter: &AppFilter,
    prompter: &mut dyn Prompter,
) -> Result<App> {
    let mut apps = client.find_apps(filter)?;
    tracing::debug!(group = %filter.group_id, app = %filter.app, matches = apps.len(), "looked up apps");

    match apps.len() {
        0 => Err(Error::AppNotFound {
            selector: filter.app.clone(),
        }),
        1 => Ok(apps.remove(0)),
        _ => {
            let options: Vec<String> = apps.iter().map(App::option_label).collect();
            let answer = prompter
                .ask(&Prompt::Select {
                    message: "Select App",
                    options: &options,
                    default: 0,
                })
                .map_err(Error::Prompt)?;

            let index = options
                .iter()
                .position(|option| *option == answer)
                .ok_or_else(|| Error::AppNotFound { selector: answer })?;
            Ok(apps.swap_remove(index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::NonInteractive;

    struct Listing(Vec<App>);

    impl AppClient for Listing {
        fn find_apps(&self, filter: &AppFilter) -> Result<Vec<App>> {
            Ok(self
                .0
                .iter()
                .filter(|app| app.matches(&filter.app))
                .cloned()
                .collect())
        }

        fn export(&self, _: &str, _: &str, _: &ExportRequest) -> Result<Export> {
            unreachable!("not used in these tests")
        }

        fn import(&self, _: &str, _: &str, _: &[u8], _: &ImportRequest) -> Result<()> {
            unreachable!("not used in these tests")
        }
    }

    struct Pick(&'static str);

    impl Prompter for Pick {
        fn ask(&mut self, _: &Prompt<'_>) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn app(name: &str, client_app_id: &str) -> App {
        App {
            id: format!("id-{}", name),
            group_id: "group".to_string(),
            client_app_id: client_app_id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn app_matches_any_identifier() {
        let todo = app("todo", "todo-abcde");
        assert!(todo.matches("todo"));
        assert!(todo.matches("todo-abcde"));
        assert!(todo.matches("id-todo"));
        assert!(todo.matches(""));
        assert!(!todo.matches("other"));
    }

    #[test]
    fn no_match_is_app_not_found() {
        let client = Listing(vec![app("todo", "todo-abcde")]);
        let err = find_app(&client, &AppFilter::new("group", "nope"), &mut NonInteractive)
            .unwrap_err();
        assert!(err.is_app_not_found());
    }

    #[test]
    fn single_match_is_returned_without_prompting() {
        let client = Listing(vec![app("todo", "todo-abcde"), app("chat", "chat-fghij")]);
        let found = find_app(&client, &AppFilter::new("group", "chat"), &mut NonInteractive)
            .unwrap();
        assert_eq!(found.client_app_id, "chat-fghij");
    }

    #[test]
    fn several_matches_are_picked_by_prompter() {
        let client = Listing(vec![app("todo", "todo-abcde"), app("chat", "chat-fghij")]);
        let found = find_app(
            &client,
            &AppFilter::new("group", ""),
            &mut Pick("chat (chat-fghij)"),
        )
        .unwrap();
        assert_eq!(found.name, "chat");
    }
}
