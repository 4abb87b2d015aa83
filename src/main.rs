//! todoist-export: write a Todoist account's projects and tasks to JSON
//!
//! Reads `exporter_configuration.json`, pulls every project, section, task
//! and comment from the Todoist API and stores the nested result in the
//! configured export directory.

use anyhow::Result;

fn main() -> Result<()> {
    todoist_export::cli::run()
}
