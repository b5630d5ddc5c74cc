use std::path::PathBuf;

use super::*;
use crate::client::{App, AppClient, AppFilter, Export, ExportRequest, ImportRequest};
use crate::error::{Error, Result};
use crate::inputs::{NonInteractive, Operation, ResolvedInputs};
use crate::types::{ConfigVersion, DeploymentModel, Location};

struct FakeClient {
    apps: Vec<App>,
    fail: bool,
}

impl FakeClient {
    fn with_apps(names: &[&str]) -> Self {
        Self {
            apps: names
                .iter()
                .map(|name| App {
                    id: format!("{}-id", name),
                    group_id: "group-1".to_string(),
                    client_app_id: format!("{}-abcde", name),
                    name: name.to_string(),
                })
                .collect(),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            apps: Vec::new(),
            fail: true,
        }
    }
}

impl AppClient for FakeClient {
    fn find_apps(&self, filter: &AppFilter) -> Result<Vec<App>> {
        if self.fail {
            return Err(Error::Remote(anyhow::anyhow!("HTTP 500: boom")));
        }
        Ok(self
            .apps
            .iter()
            .filter(|app| app.matches(&filter.app))
            .cloned()
            .collect())
    }

    fn export(&self, _: &str, _: &str, _: &ExportRequest) -> Result<Export> {
        unreachable!("selection never exports")
    }

    fn import(&self, _: &str, _: &str, _: &[u8], _: &ImportRequest) -> Result<()> {
        unreachable!("selection never imports")
    }
}

fn inputs(from: &str, from_type: Option<FromType>) -> ResolvedInputs {
    ResolvedInputs {
        operation: Operation::Init,
        project: "group-1".to_string(),
        from: from.to_string(),
        from_type,
        name: String::new(),
        location: Location::Unset,
        deployment_model: DeploymentModel::Unset,
        target: PathBuf::from("/work"),
        app_version: ConfigVersion::ZERO,
        project_dir: None,
        include_dependencies: false,
        include_hosting: false,
        dry_run: false,
    }
}

#[test]
fn classify_always_picks_app() {
    assert_eq!(classify("todo"), FromType::App);
    assert_eq!(classify("template:starter"), FromType::App);
}

#[test]
fn from_type_parses_flag_values() {
    assert_eq!("app".parse::<FromType>().unwrap(), FromType::App);
    assert_eq!("Template".parse::<FromType>().unwrap(), FromType::Template);

    let err = "repo".parse::<FromType>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported source type 'repo', use one of [app, template] instead"
    );
}

#[test]
fn no_from_type_selects_scaffold() {
    let client = FakeClient::with_apps(&[]);
    let selection = select_source(&inputs("", None), &client, &mut NonInteractive).unwrap();
    assert_eq!(selection, SourceSelection::Scaffold);
    assert!(selection.is_scaffold());
}

#[test]
fn app_selects_existing_app() {
    let client = FakeClient::with_apps(&["todo", "chat"]);
    let selection = select_source(
        &inputs("todo-abcde", Some(FromType::App)),
        &client,
        &mut NonInteractive,
    )
    .unwrap();

    assert_eq!(
        selection,
        SourceSelection::ExistingApp {
            group_id: "group-1".to_string(),
            app_id: "todo-id".to_string(),
        }
    );
}

#[test]
fn unknown_app_is_not_found() {
    let client = FakeClient::with_apps(&["todo"]);
    let err = select_source(
        &inputs("missing", Some(FromType::App)),
        &client,
        &mut NonInteractive,
    )
    .unwrap_err();
    assert!(err.is_app_not_found());
}

#[test]
fn template_is_selected_without_lookup() {
    let client = FakeClient::failing();
    let selection = select_source(
        &inputs("starter", Some(FromType::Template)),
        &client,
        &mut NonInteractive,
    )
    .unwrap();

    assert_eq!(
        selection,
        SourceSelection::Template {
            template_id: "starter".to_string()
        }
    );
}

#[test]
fn resolve_app_or_group_tolerates_not_found() {
    let client = FakeClient::with_apps(&["todo"]);
    let filter = AppFilter::new("group-1", "missing");
    assert_eq!(
        resolve_app_or_group(&client, &filter, &mut NonInteractive).unwrap(),
        None
    );
}

#[test]
fn resolve_app_or_group_propagates_other_errors() {
    let client = FakeClient::failing();
    let filter = AppFilter::new("group-1", "todo");
    let err = resolve_app_or_group(&client, &filter, &mut NonInteractive).unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
}
