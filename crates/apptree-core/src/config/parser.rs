//! JSON codec for the project marker file.
//!
//! Output is deterministic: fixed field order, four-space indentation and a
//! trailing newline, so identical configs always produce identical bytes.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde_json::ser::PrettyFormatter;

use super::schema::ProjectConfig;
use crate::error::{Error, Result};

/// Indentation used for every JSON file the tool writes.
pub const JSON_INDENT: &[u8] = b"    ";

/// Read and parse a project config file.
pub fn read_config(path: &Path) -> Result<ProjectConfig> {
    let data = read_config_bytes(path)?;
    decode_config(path, &data)
}

/// Read the raw bytes of a config file, rejecting an empty one.
pub fn read_config_bytes(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path).map_err(|e| Error::io("failed to read config file", path, e))?;

    if data.is_empty() {
        return Err(Error::EmptyConfig {
            path: path.to_path_buf(),
        });
    }
    Ok(data)
}

/// Decode config bytes read from `path` into any config shape.
pub fn decode_config<T: DeserializeOwned>(path: &Path, data: &[u8]) -> Result<T> {
    serde_json::from_slice(data).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse project config content from a string.
pub fn parse_config_str(content: &str) -> std::result::Result<ProjectConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Serialize a config the way it is written to disk.
pub fn to_json_string(config: &ProjectConfig) -> Result<String> {
    to_indented_json(config)
}

/// Serialize any value with the tool's JSON layout.
pub fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(Error::Serialize)?;
    buf.push(b'\n');

    String::from_utf8(buf).map_err(|e| Error::Serialize(serde_json::Error::custom(e)))
}

/// Write a project config, creating the parent directory if needed.
pub fn write_config(path: &Path, config: &ProjectConfig) -> Result<()> {
    let content = to_json_string(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::io("failed to create directory", parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io("failed to write config file", path, e))?;
    tracing::debug!(path = %path.display(), "wrote project config");
    Ok(())
}
