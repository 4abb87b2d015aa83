//! todoist-export: export Todoist data as a nested JSON document
//!
//! The Todoist API hands out projects, sections, tasks and comments as flat
//! collections linked only by identifiers. This crate fetches those
//! collections, rebuilds the project/section/task/comment hierarchy and
//! writes it as a single pruned, human-readable JSON file.

pub mod attachments;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod tree;

pub use error::{ExportError, IdKind};
