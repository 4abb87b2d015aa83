//! Remote access to Todoist: listing collections and retrieving files
//!
//! The pipeline only talks to the traits defined here:
//! - [`TodoistApi`] lists the flat entity collections
//! - [`FileSource`] streams an attachment to disk
//!
//! [`client::RestClient`] implements both over HTTP; tests supply fakes.

use std::path::Path;

use crate::domain::{CommentRecord, ProjectRecord, SectionRecord, TaskRecord};
use crate::error::ExportError;

pub mod client;
pub mod retry;

pub use client::{RestClient, DEFAULT_API_BASE_URL};
pub use retry::RetryPolicy;

pub trait TodoistApi {
    fn projects(&self) -> Result<Vec<ProjectRecord>, ExportError>;
    fn tasks(&self) -> Result<Vec<TaskRecord>, ExportError>;
    fn sections(&self) -> Result<Vec<SectionRecord>, ExportError>;
    fn comments(&self, task_id: &str) -> Result<Vec<CommentRecord>, ExportError>;
}

/// Outcome of a file retrieval that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Saved { bytes: u64 },
    Rejected { status: u16, body: String },
}

pub trait FileSource {
    /// Fetch `url` with `token` as bearer credential and write it to
    /// `destination`. Nothing is written unless the server answers with
    /// a success status.
    fn download(&self, url: &str, token: &str, destination: &Path)
        -> Result<Transfer, ExportError>;
}
