//! Export file naming and writing.

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

pub const EXPORT_FILE_SUFFIX: &str = "_todoist_json_export.json";

/// `<YYYYMMDD_HHMMSS>_todoist_json_export.json` for the given moment.
pub fn export_file_name<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}{EXPORT_FILE_SUFFIX}", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Pretty-print with four-space indentation. Non-ASCII text is written as is.
pub fn to_pretty_json(document: &Value) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;
    String::from_utf8(buffer)
        .map_err(|err| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Write the document into `export_directory`, which must already exist.
pub fn write_export<Tz>(
    export_directory: &Path,
    document: &Value,
    timestamp: &DateTime<Tz>,
) -> Result<PathBuf, ExportError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let path = export_directory.join(export_file_name(timestamp));
    std::fs::write(&path, to_pretty_json(document)?)?;
    Ok(path)
}
