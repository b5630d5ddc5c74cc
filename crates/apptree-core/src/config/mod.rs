//! Configuration files.
//!
//! Two documents live here:
//! - Project: `config.json` at the root of every project (the marker file)
//! - Settings: `~/.config/apptree/config.toml`, user-level CLI defaults

pub mod parser;
pub mod paths;
pub mod schema;
pub mod settings;

pub use parser::{
    decode_config, parse_config_str, read_config, read_config_bytes, to_json_string, write_config,
};
pub use paths::{PROJECT_CONFIG_FILE, expand_home, project_config_path};
pub use schema::{CustomUserDataConfig, ProjectConfig, SecurityConfig, SyncConfig};
pub use settings::Settings;
