//! Integration tests for the init command.

mod support;

use apptree_core::commands::InitCommand;
use apptree_core::inputs::{InputFlags, NonInteractive, ResolveDefaults};
use apptree_core::source::FromType;
use apptree_core::types::{DeploymentModel, Location};
use apptree_core::Error;
use support::{FakeClient, Scripted, app, zip_of};
use tempfile::TempDir;

const SCAFFOLD: &str = r#"{
    "config_version": 20200603,
    "name": "test-app",
    "location": "US-VA",
    "deployment_model": "GLOBAL",
    "security": {},
    "custom_user_data_config": {
        "enabled": false
    },
    "sync": {
        "development_mode_enabled": false
    }
}
"#;

#[test]
fn fresh_init_writes_exact_scaffold() {
    let tmp = TempDir::new().unwrap();
    let client = FakeClient::default();
    let mut prompter = Scripted::new(&["test-app"]);

    let report = InitCommand::new(tmp.path(), &client)
        .execute(InputFlags::new(), &mut prompter)
        .expect("init should succeed");

    assert_eq!(prompter.asked, vec!["App Name"]);
    assert_eq!(report.source, "scaffold");
    assert_eq!(report.name, "test-app");
    assert_eq!(report.files, vec![tmp.path().join("config.json")]);
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("config.json")).unwrap(),
        SCAFFOLD
    );
}

#[test]
fn flags_are_written_without_prompting() {
    let tmp = TempDir::new().unwrap();
    let client = FakeClient::default();

    InitCommand::new(tmp.path(), &client)
        .with_defaults(ResolveDefaults::prompt())
        .execute(
            InputFlags::new()
                .with_name("eggcorn")
                .with_location(Location::Frankfurt)
                .with_deployment_model(DeploymentModel::Local)
                .with_target("nested/app"),
            &mut NonInteractive,
        )
        .expect("init should succeed");

    let written = std::fs::read_to_string(tmp.path().join("nested/app/config.json")).unwrap();
    assert!(written.contains(r#""name": "eggcorn""#));
    assert!(written.contains(r#""location": "DE-FF""#));
    assert!(written.contains(r#""deployment_model": "LOCAL""#));
}

#[test]
fn init_inside_project_fails_without_prompt_or_write() {
    let tmp = TempDir::new().unwrap();
    let original = r#"{"name":"eggcorn"}"#;
    std::fs::write(tmp.path().join("config.json"), original).unwrap();
    let inner = tmp.path().join("functions");
    std::fs::create_dir(&inner).unwrap();

    let client = FakeClient::default();
    let mut prompter = Scripted::new(&[]);
    let err = InitCommand::new(&inner, &client)
        .execute(InputFlags::new(), &mut prompter)
        .unwrap_err();

    assert!(matches!(err, Error::ProjectExists { .. }));
    assert!(prompter.asked.is_empty());
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("config.json")).unwrap(),
        original
    );
    assert!(!inner.join("config.json").exists());
}

#[test]
fn init_from_app_unpacks_templated_export() {
    let tmp = TempDir::new().unwrap();
    let client = FakeClient::new(vec![app("todo")]).with_archive(zip_of(&[
        ("config.json", r#"{"config_version":20200603,"name":"todo"}"#),
        ("functions/main.js", "exports = () => 1"),
    ]));

    let report = InitCommand::new(tmp.path(), &client)
        .execute(
            InputFlags::new().with_project("group-1").with_from("todo"),
            &mut NonInteractive,
        )
        .expect("init from app should succeed");

    assert_eq!(report.source, "app");
    assert_eq!(report.files.len(), 2);
    assert!(tmp.path().join("functions/main.js").is_file());

    let exports = client.exports.borrow();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].1, "todo-id");
    assert!(exports[0].2.is_templated);
}

#[test]
fn init_from_unknown_app_fails() {
    let tmp = TempDir::new().unwrap();
    let client = FakeClient::new(vec![app("todo")]);

    let err = InitCommand::new(tmp.path(), &client)
        .execute(
            InputFlags::new().with_project("group-1").with_from("missing"),
            &mut NonInteractive,
        )
        .unwrap_err();

    assert!(err.is_app_not_found());
    assert!(!tmp.path().join("config.json").exists());
}

#[test]
fn init_from_template_is_unsupported() {
    let tmp = TempDir::new().unwrap();
    let client = FakeClient::default();

    let err = InitCommand::new(tmp.path(), &client)
        .execute(
            InputFlags::new()
                .with_from("starter")
                .with_from_type(FromType::Template),
            &mut NonInteractive,
        )
        .unwrap_err();

    assert!(matches!(err, Error::TemplateUnsupported));
    assert_eq!(err.to_string(), "initializing from templates is not yet supported");
    assert!(!tmp.path().join("config.json").exists());
}

#[test]
fn non_interactive_init_without_name_fails() {
    let tmp = TempDir::new().unwrap();
    let client = FakeClient::default();

    let err = InitCommand::new(tmp.path(), &client)
        .execute(InputFlags::new(), &mut NonInteractive)
        .unwrap_err();

    assert!(matches!(err, Error::Prompt(_)));
}

#[test]
fn init_below_unrelated_config_writes_into_working_directory() {
    let tmp = TempDir::new().unwrap();
    let foreign = r#"{"theme":"dark","port":8080}"#;
    std::fs::write(tmp.path().join("config.json"), foreign).unwrap();
    let work = tmp.path().join("work/newapp");

    let client = FakeClient::default();
    let mut prompter = Scripted::new(&["test-app"]);
    let report = InitCommand::new(&work, &client)
        .execute(InputFlags::new(), &mut prompter)
        .expect("init should succeed");

    assert_eq!(report.target, work);
    assert_eq!(std::fs::read_to_string(work.join("config.json")).unwrap(), SCAFFOLD);
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("config.json")).unwrap(),
        foreign
    );
}

#[test]
fn init_below_config_with_unknown_location_succeeds() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.json"), r#"{"location":"NYC"}"#).unwrap();
    let work = tmp.path().join("app");
    std::fs::create_dir(&work).unwrap();

    let client = FakeClient::default();
    let mut prompter = Scripted::new(&["test-app"]);
    InitCommand::new(&work, &client)
        .execute(InputFlags::new(), &mut prompter)
        .expect("init should succeed");

    assert_eq!(std::fs::read_to_string(work.join("config.json")).unwrap(), SCAFFOLD);
}
