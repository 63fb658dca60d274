//! Reading collaborator data files (capture bundles, token sets).
//!
//! The format is chosen from the file extension: `json`, `yaml`/`yml` or `toml`.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{DqaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            "toml" => Ok(DataFormat::Toml),
            other => Err(DqaError::parse(format!(
                "Unsupported file extension '{}' for {}. Supported data extensions: json, yaml, yml, toml.",
                other,
                path.display()
            ))),
        }
    }

    pub fn parse<T: DeserializeOwned>(self, raw: &str) -> Result<T> {
        match self {
            DataFormat::Json => Ok(serde_json::from_str(raw)?),
            DataFormat::Yaml => Ok(serde_yaml::from_str(raw)?),
            DataFormat::Toml => Ok(toml::from_str(raw)?),
        }
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(DqaError::Config(format!("File not found: {}", path.display())))
    }
}

pub fn read_data_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DataFormat::from_path(path)?;
    ensure_exists(path)?;
    let raw = std::fs::read_to_string(path)?;
    format.parse(&raw)
}

pub async fn read_data_file_async<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DataFormat::from_path(path)?;
    ensure_exists(path)?;
    let raw = tokio::fs::read_to_string(path).await?;
    format.parse(&raw)
}
