//! Configuration loading and merging
//!
//! Handles loading the exporter configuration file and applying CLI and
//! environment overrides with precedence CLI/Env > File > Defaults.

use anyhow::Result;
use std::path::Path;

pub mod loader;
pub mod merge;

pub use loader::{load_config, FileConfig, DEFAULT_CONFIG_FILE};
pub use merge::{merge_cli_with_config, CliOverrides, ExporterConfig};

/// Load the configuration file and merge the overrides into it.
///
/// An explicitly named file must exist. The default file may be missing
/// only when the token is supplied on the command line or in the
/// environment.
pub fn resolve_config(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<ExporterConfig> {
    let file_config = match config_path {
        Some(path) => Some(load_config(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() || overrides.token.is_none() {
                Some(load_config(default_path)?)
            } else {
                None
            }
        }
    };

    Ok(merge_cli_with_config(file_config.unwrap_or_default(), overrides)?)
}
