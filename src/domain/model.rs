//! Export tree nodes.
//!
//! Nodes are assembled once by [`crate::tree::build_forest`] and read by the
//! renderer. Each node is owned by exactly one parent collection.

use indexmap::IndexMap;

/// Bucket label for tasks that do not belong to a section.
pub const DEFAULT_SECTION: &str = "-";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Export {
    pub projects: Vec<Project>,
}

impl Export {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    pub fn stats(&self) -> ExportStats {
        let mut stats = ExportStats::default();
        for project in &self.projects {
            project.collect_stats(&mut stats);
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    /// Section label to tasks, in first-seen order. The default bucket is
    /// always present and always first.
    pub sections: IndexMap<String, Vec<Task>>,
    pub child_projects: Vec<Project>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        let mut sections = IndexMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), Vec::new());
        Self { name: name.into(), sections, child_projects: Vec::new() }
    }

    pub fn add_task(&mut self, section: &str, task: Task) {
        self.sections.entry(section.to_string()).or_default().push(task);
    }

    pub fn add_child_project(&mut self, project: Project) {
        self.child_projects.push(project);
    }

    pub fn section(&self, label: &str) -> Option<&[Task]> {
        self.sections.get(label).map(Vec::as_slice)
    }

    fn collect_stats(&self, stats: &mut ExportStats) {
        stats.projects += 1;
        for task in self.sections.values().flatten() {
            task.collect_stats(stats);
        }
        for child in &self.child_projects {
            child.collect_stats(stats);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    pub created_at: String,
    pub content: String,
    pub description: String,
    pub priority: i64,
    pub due: Option<DueDate>,
    pub duration: Option<TaskDuration>,
    pub labels: Vec<String>,
    pub child_tasks: Vec<Task>,
    pub comments: Vec<Comment>,
}

impl Task {
    pub fn add_child_task(&mut self, task: Task) {
        self.child_tasks.push(task);
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    fn collect_stats(&self, stats: &mut ExportStats) {
        stats.tasks += 1;
        stats.comments += self.comments.len();
        stats.attachments_referenced += self
            .comments
            .iter()
            .filter(|c| c.attachment.as_ref().is_some_and(|a| a.local_file_name.is_some()))
            .count();
        for child in &self.child_tasks {
            child.collect_stats(stats);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DueDate {
    pub date: String,
    pub is_recurring: bool,
    pub due_string: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDuration {
    pub amount: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comment {
    pub content: String,
    pub posted_at: String,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attachment {
    pub file_type: Option<String>,
    pub file_url: Option<String>,
    pub resource_type: Option<String>,
    /// Name assigned inside the export directory. Set whenever a download was
    /// attempted, so the file may be missing.
    pub local_file_name: Option<String>,
}

/// Totals reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub projects: usize,
    pub tasks: usize,
    pub comments: usize,
    /// Attachments given a local file name, whether or not the download
    /// succeeded.
    pub attachments_referenced: usize,
}
