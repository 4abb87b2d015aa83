//! Export command implementation

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::config::{resolve_config, CliOverrides};
use crate::fetch::RestClient;
use crate::logging::{ExportLogger, TracingLogger};
use crate::pipeline::{ExportOptions, Exporter};

#[derive(Args)]
pub struct ExportArgs {
    /// Path to config file (default: exporter_configuration.json)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Todoist API token, overrides the configuration file
    #[arg(long, value_name = "TOKEN", env = "TODOIST_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory for the export file and attachments
    #[arg(short = 'o', long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Do not download comment attachments
    #[arg(long)]
    pub no_attachments: bool,

    /// Base URL of the Todoist API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let overrides = CliOverrides {
        token: args.token,
        export_dir: args.export_dir,
        no_attachments: args.no_attachments,
        api_url: args.api_url,
    };
    let config = resolve_config(args.config.as_deref(), &overrides)?;

    let logger = TracingLogger;
    logger.info(&format!(
        "exporting to '{}' (attachments: {})",
        config.export_directory.display(),
        if config.download_attachments { "on" } else { "off" }
    ));

    let client = RestClient::new(&config.api_base_url, &config.todoist_token)
        .context("Failed building HTTP client")?;
    let exporter = Exporter::new(&client, &client, &logger, ExportOptions::from(&config));

    // Past configuration, failures are logged and the process still exits 0.
    if let Err(err) = exporter.run(&Local::now()) {
        logger.error(&format!("export failed: {err}"));
    }
    Ok(())
}
