//! The export run: fetch, assemble, render, write.
//!
//! Everything happens sequentially on the calling thread. Remote calls go
//! through the run's [`RetryPolicy`]; a top-level collection that cannot be
//! fetched aborts the run, missing comments only drop those comments.

use chrono::{DateTime, TimeZone};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::attachments::AttachmentResolver;
use crate::config::ExporterConfig;
use crate::domain::{Attachment, Comment, CommentRecord, Export, ExportStats, TaskRecord};
use crate::error::ExportError;
use crate::fetch::{FileSource, RetryPolicy, TodoistApi};
use crate::logging::ExportLogger;
use crate::render::{render_pruned, write_export};
use crate::tree::build_forest;

/// Pause after each processed comment, to stay under the API rate limit.
pub const COMMENT_PACING: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub token: String,
    pub export_directory: PathBuf,
    pub download_attachments: bool,
    pub retry: RetryPolicy,
    pub comment_pacing: Duration,
}

impl ExportOptions {
    /// Options without any waiting, for tests and dry runs against fakes.
    pub fn without_delays(mut self) -> Self {
        self.retry = RetryPolicy::immediate();
        self.comment_pacing = Duration::ZERO;
        self
    }
}

impl From<&ExporterConfig> for ExportOptions {
    fn from(config: &ExporterConfig) -> Self {
        Self {
            token: config.todoist_token.clone(),
            export_directory: config.export_directory.clone(),
            download_attachments: config.download_attachments,
            retry: RetryPolicy::default(),
            comment_pacing: COMMENT_PACING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub stats: ExportStats,
}

pub struct Exporter<'a> {
    api: &'a dyn TodoistApi,
    files: &'a dyn FileSource,
    logger: &'a dyn ExportLogger,
    options: ExportOptions,
}

impl<'a> Exporter<'a> {
    pub fn new(
        api: &'a dyn TodoistApi,
        files: &'a dyn FileSource,
        logger: &'a dyn ExportLogger,
        options: ExportOptions,
    ) -> Self {
        Self { api, files, logger, options }
    }

    /// Run the whole export and write the document stamped with `timestamp`.
    pub fn run<Tz>(&self, timestamp: &DateTime<Tz>) -> Result<ExportSummary, ExportError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        std::fs::create_dir_all(&self.options.export_directory)?;

        let export = self.collect()?;
        let stats = export.stats();

        let document = render_pruned(&export);
        let path = write_export(&self.options.export_directory, &document, timestamp)?;
        self.logger.info(&format!(
            "exported {} projects, {} tasks, {} comments and {} attachment references to '{}'",
            stats.projects,
            stats.tasks,
            stats.comments,
            stats.attachments_referenced,
            path.display()
        ));
        Ok(ExportSummary { path, stats })
    }

    /// Fetch every collection and assemble the forest, without writing it.
    pub fn collect(&self) -> Result<Export, ExportError> {
        let retry = &self.options.retry;

        self.logger.info("Getting all projects");
        let projects = retry
            .call("list projects", self.logger, || self.api.projects())
            .ok_or(ExportError::MissingCollection("projects"))?;

        self.logger.info("Getting all tasks");
        let tasks = retry
            .call("list tasks", self.logger, || self.api.tasks())
            .ok_or(ExportError::MissingCollection("tasks"))?;

        let mut comments = HashMap::new();
        for task in tasks.iter().filter(|task| task.comment_count > 0) {
            comments.insert(task.id.clone(), self.task_comments(task));
        }

        self.logger.info("Getting all sections");
        let sections = retry
            .call("list sections", self.logger, || self.api.sections())
            .ok_or(ExportError::MissingCollection("sections"))?;

        self.logger.info("Building project and task hierarchy");
        build_forest(&projects, &tasks, &sections, comments)
    }

    fn task_comments(&self, task: &TaskRecord) -> Vec<Comment> {
        self.logger.info(&format!("Getting comments for task {}", task.id));
        let what = format!("list comments of task {}", task.id);
        let Some(records) =
            self.options.retry.call(&what, self.logger, || self.api.comments(&task.id))
        else {
            self.logger.warn(&format!("exporting task {} without its comments", task.id));
            return Vec::new();
        };

        let resolver = AttachmentResolver::new(
            &self.options.token,
            &self.options.export_directory,
            self.files,
            self.logger,
        );

        let mut comments = Vec::with_capacity(records.len());
        for record in records {
            comments.push(self.comment(record, &resolver));
            thread::sleep(self.options.comment_pacing);
        }
        comments
    }

    fn comment(&self, record: CommentRecord, resolver: &AttachmentResolver<'_>) -> Comment {
        let attachment = record.attachment.map(|attachment| {
            let local_file_name = match &attachment.file_url {
                Some(url) if self.options.download_attachments => {
                    Some(resolver.resolve(&record.id, url))
                }
                _ => None,
            };
            Attachment {
                file_type: attachment.file_type,
                file_url: attachment.file_url,
                resource_type: attachment.resource_type,
                local_file_name,
            }
        });

        Comment { content: record.content, posted_at: record.posted_at, attachment }
    }
}
