//! Command-line interface for todoist-export
//!
//! A single command: load the configuration, run the export, log the outcome.

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod export;

/// Export Todoist projects, tasks, comments and attachments to JSON
#[derive(Parser)]
#[command(name = "todoist-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    export: export::ExportArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer().with_writer(std::io::stderr).with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .try_init();

    export::run(cli.export)
}
