//! Integration tests for project discovery and the config codec together.

use apptree_core::config::{ProjectConfig, read_config, write_config};
use apptree_core::project::{MAX_SEARCH_DEPTH, resolve_project};
use apptree_core::types::{DeploymentModel, Location};
use tempfile::TempDir;

#[test]
fn written_scaffold_is_discovered_from_deep_subdirectory() {
    let tmp = TempDir::new().unwrap();
    let config = ProjectConfig::scaffold("todo", Location::Mumbai, DeploymentModel::Local);
    write_config(&tmp.path().join("config.json"), &config).unwrap();

    let mut deep = tmp.path().to_path_buf();
    for i in 0..MAX_SEARCH_DEPTH {
        deep = deep.join(format!("level{}", i));
    }
    std::fs::create_dir_all(&deep).unwrap();

    let found = resolve_project(&deep).unwrap().expect("project should be found");
    assert_eq!(found.config, config);
    assert_eq!(found.dir, std::path::absolute(tmp.path()).unwrap());
}

#[test]
fn nameless_marker_is_found_but_not_a_project() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.json"), r#"{"config_version":20200603}"#).unwrap();

    let found = resolve_project(tmp.path()).unwrap().unwrap();
    assert!(!found.is_project());
}

#[test]
fn exported_config_with_extra_keys_round_trips_known_fields() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
    "config_version": 20200603,
    "client_app_id": "todo-abcde",
    "name": "todo",
    "location": "AU",
    "deployment_model": "GLOBAL",
    "provider_region": "aws-ap-southeast-2",
    "allowed_request_origins": ["https://example.com"]
}"#,
    )
    .unwrap();

    let config = read_config(&path).unwrap();
    assert_eq!(config.app_id, "todo-abcde");
    assert_eq!(config.location, Location::Sydney);
    assert_eq!(config.app_selector(), "todo-abcde");
}
