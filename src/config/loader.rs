//! Config file loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

pub const DEFAULT_CONFIG_FILE: &str = "exporter_configuration.json";

/// Keys recognised in the configuration file. Everything is optional here;
/// required values are enforced when merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub todoist_token: Option<String>,
    #[serde(default)]
    pub export_directory: Option<PathBuf>,
    #[serde(default)]
    pub download_attachments: Option<bool>,
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// Read a configuration file; the format is chosen by extension
/// (`.json`, `.toml`, `.yaml`/`.yml`).
pub fn load_config(config_file: &Path) -> Result<FileConfig> {
    if !config_file.is_file() {
        return Err(ExportError::Config(format!(
            "there is no configuration file '{}'",
            config_file.display()
        ))
        .into());
    }

    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext =
        config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON config: {}", config_file.display())),
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML config: {}", config_file.display())),
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML config: {}", config_file.display())),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}
