//! Typed failures of the export pipeline.

use std::fmt;

/// Identifier namespace a failed lookup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Project,
    Task,
    Section,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdKind::Project => "project",
            IdKind::Task => "task",
            IdKind::Section => "section",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not fetch {0} from the Todoist API")]
    MissingCollection(&'static str),

    #[error("unknown {kind} id '{id}' referenced by {referrer}")]
    UnknownId { kind: IdKind, id: String, referrer: String },

    #[error("{kind} '{id}' is part of a parent cycle and cannot be placed in the tree")]
    ParentCycle { kind: IdKind, id: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
