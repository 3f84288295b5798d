//! Structured config decoders.
//!
//! Fields typed as [`StringDuration`](crate::StringDuration) decode through
//! its `Deserialize` impl, so every loader here canonicalizes durations the
//! same way flags and JSON do.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Decodes a YAML document.
pub fn from_yaml_str<T: DeserializeOwned>(content: &str) -> Result<T> {
    let config: T = serde_yaml::from_str(content)?;
    Ok(config)
}

/// Reads and decodes a YAML file.
pub fn load_yaml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let config = from_yaml_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    debug!("Loaded YAML config from {}", path.display());
    Ok(config)
}

/// Decodes a TOML document. Also accepts flat HCL-style attribute files
/// (`timeout = "30s"`).
pub fn from_toml_str<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(toml::from_str(content)?)
}

/// Reads and decodes a TOML file.
pub fn load_toml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let config = from_toml_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    debug!("Loaded TOML config from {}", path.display());
    Ok(config)
}

/// Decodes a string-keyed map of loosely typed values into `T`.
pub fn decode_map<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(map))
}
