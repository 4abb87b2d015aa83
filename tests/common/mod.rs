//! In-memory stand-ins for the Todoist API and file downloads.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use todoist_export::domain::{
    AttachmentRecord, CommentRecord, ProjectRecord, SectionRecord, TaskRecord,
};
use todoist_export::fetch::{FileSource, TodoistApi, Transfer};
use todoist_export::ExportError;

#[derive(Default)]
pub struct FakeApi {
    pub projects: Vec<ProjectRecord>,
    pub tasks: Vec<TaskRecord>,
    pub sections: Vec<SectionRecord>,
    pub comments: HashMap<String, Vec<CommentRecord>>,
    /// Number of leading failures per collection name before answering.
    pub failures: RefCell<HashMap<String, u32>>,
    pub comment_calls: Cell<usize>,
}

impl FakeApi {
    pub fn fail_first(&self, what: &str, times: u32) {
        self.failures.borrow_mut().insert(what.to_string(), times);
    }

    fn answer<T: Clone>(&self, what: &str, value: &[T]) -> Result<Vec<T>, ExportError> {
        let mut failures = self.failures.borrow_mut();
        if let Some(remaining) = failures.get_mut(what) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ExportError::Status { status: 503, body: "unavailable".into() });
            }
        }
        Ok(value.to_vec())
    }
}

impl TodoistApi for FakeApi {
    fn projects(&self) -> Result<Vec<ProjectRecord>, ExportError> {
        self.answer("projects", &self.projects)
    }

    fn tasks(&self) -> Result<Vec<TaskRecord>, ExportError> {
        self.answer("tasks", &self.tasks)
    }

    fn sections(&self) -> Result<Vec<SectionRecord>, ExportError> {
        self.answer("sections", &self.sections)
    }

    fn comments(&self, task_id: &str) -> Result<Vec<CommentRecord>, ExportError> {
        self.comment_calls.set(self.comment_calls.get() + 1);
        let comments = self.comments.get(task_id).cloned().unwrap_or_default();
        self.answer(&format!("comments:{task_id}"), &comments)
    }
}

#[derive(Default)]
pub struct FakeFiles {
    pub downloads: RefCell<Vec<String>>,
    /// URLs answered with 404 instead of content.
    pub missing: Vec<String>,
}

impl FileSource for FakeFiles {
    fn download(
        &self,
        url: &str,
        _token: &str,
        destination: &Path,
    ) -> Result<Transfer, ExportError> {
        self.downloads.borrow_mut().push(url.to_string());
        if self.missing.iter().any(|m| m == url) {
            return Ok(Transfer::Rejected { status: 404, body: "not found".into() });
        }
        let content = format!("content of {url}");
        fs::write(destination, &content)?;
        Ok(Transfer::Saved { bytes: content.len() as u64 })
    }
}

pub fn project(id: &str, name: &str, parent: Option<&str>) -> ProjectRecord {
    ProjectRecord { id: id.into(), name: name.into(), parent_id: parent.map(Into::into) }
}

pub fn task(id: &str, project_id: &str, content: &str) -> TaskRecord {
    TaskRecord {
        id: id.into(),
        project_id: project_id.into(),
        content: content.into(),
        priority: 1,
        created_at: "2024-01-01T09:00:00Z".into(),
        ..TaskRecord::default()
    }
}

pub fn section(id: &str, project_id: &str, name: &str) -> SectionRecord {
    SectionRecord { id: id.into(), project_id: project_id.into(), order: 1, name: name.into() }
}

pub fn comment(id: &str, content: &str, file_url: Option<&str>) -> CommentRecord {
    CommentRecord {
        id: id.into(),
        content: content.into(),
        posted_at: "2024-01-02T10:00:00Z".into(),
        attachment: file_url.map(|url| AttachmentRecord {
            file_type: Some("image/png".into()),
            file_url: Some(url.into()),
            resource_type: Some("file".into()),
        }),
    }
}
