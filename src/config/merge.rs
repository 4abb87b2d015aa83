//! Merge file configuration with command-line overrides.

use std::path::PathBuf;

use super::loader::FileConfig;
use crate::error::ExportError;
use crate::fetch::DEFAULT_API_BASE_URL;

pub const DEFAULT_EXPORT_DIRECTORY: &str = "export";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    pub todoist_token: String,
    pub export_directory: PathBuf,
    pub download_attachments: bool,
    pub api_base_url: String,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub token: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub no_attachments: bool,
    pub api_url: Option<String>,
}

pub fn merge_cli_with_config(
    file: FileConfig,
    cli: &CliOverrides,
) -> Result<ExporterConfig, ExportError> {
    let todoist_token = cli
        .token
        .clone()
        .or(file.todoist_token)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ExportError::Config(
                "no Todoist access token found; set 'todoist_token' in the configuration file \
                 or pass --token"
                    .to_string(),
            )
        })?;

    let export_directory = cli
        .export_dir
        .clone()
        .or(file.export_directory)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIRECTORY));

    let download_attachments = !cli.no_attachments && file.download_attachments.unwrap_or(true);

    let api_base_url = cli
        .api_url
        .clone()
        .or(file.api_base_url)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    Ok(ExporterConfig { todoist_token, export_directory, download_attachments, api_base_url })
}
