use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// On-disk encoding of a model or job file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = match Format::from_path(path) {
        Format::Json => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON {}", path.display()))?,
        Format::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML {}", path.display()))?,
    };
    Ok(value)
}

pub fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = match Format::from_path(path) {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    };
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}
