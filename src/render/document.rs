//! Render the export forest into a JSON value tree.
//!
//! Rendering is the first of two passes: every field is emitted, absent
//! values become `null`. [`super::prune::prune_empty`] removes the empty
//! ones afterwards.

use serde_json::{json, Map, Value};

use crate::domain::{Attachment, Comment, DueDate, Export, Project, Task, TaskDuration};

/// Prefix put in front of each section label in the `tasks` mapping.
pub const SECTION_PREFIX: &str = "Section: ";

pub fn render_export(export: &Export) -> Value {
    Value::Array(export.projects.iter().map(render_project).collect())
}

pub fn render_project(project: &Project) -> Value {
    let mut sections = Map::new();
    for (label, tasks) in &project.sections {
        sections.insert(
            format!("{SECTION_PREFIX}{label}"),
            Value::Array(tasks.iter().map(render_task).collect()),
        );
    }

    json!({
        "project_name": project.name,
        "tasks": Value::Object(sections),
        "child_projects": project.child_projects.iter().map(render_project).collect::<Vec<_>>(),
    })
}

pub fn render_task(task: &Task) -> Value {
    json!({
        "task_content": task.content,
        "task_description": split_lines(&task.description),
        "labels": task.labels,
        "task_created_at": task.created_at,
        "task_priority": task.priority,
        "task_due_date": task.due.as_ref().map(render_due),
        "task_duration": task.duration.as_ref().map(render_duration),
        "comments": task.comments.iter().map(render_comment).collect::<Vec<_>>(),
        "child_tasks": task.child_tasks.iter().map(render_task).collect::<Vec<_>>(),
    })
}

fn render_due(due: &DueDate) -> Value {
    json!({
        "date": due.date,
        "is_recurring": due.is_recurring,
        "due_string": due.due_string,
    })
}

fn render_duration(duration: &TaskDuration) -> Value {
    json!({
        "amount": duration.amount,
        "unit": duration.unit,
    })
}

fn render_comment(comment: &Comment) -> Value {
    json!({
        "content": split_lines(&comment.content),
        "date": comment.posted_at,
        "attachment": comment.attachment.as_ref().map(render_attachment),
    })
}

fn render_attachment(attachment: &Attachment) -> Value {
    json!({
        "file_type": attachment.file_type,
        "file_url": attachment.file_url,
        "resource_type": attachment.resource_type,
        "local_file_name": attachment.local_file_name,
    })
}

/// Split text on line breaks, dropping empty lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_drops_blank_lines() {
        assert_eq!(split_lines("first\n\nsecond\r\nthird\n"), vec!["first", "second", "third"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn task_keys_follow_documented_order() {
        let task = Task {
            content: "Write report".into(),
            description: "line one\nline two".into(),
            priority: 3,
            due: Some(DueDate {
                date: "2024-06-01".into(),
                is_recurring: false,
                due_string: "Jun 1".into(),
            }),
            ..Task::default()
        };

        let rendered = render_task(&task);
        let keys: Vec<&str> =
            rendered.as_object().expect("object").keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "task_content",
                "task_description",
                "labels",
                "task_created_at",
                "task_priority",
                "task_due_date",
                "task_duration",
                "comments",
                "child_tasks",
            ]
        );
        assert_eq!(rendered["task_description"], json!(["line one", "line two"]));
        assert_eq!(rendered["task_due_date"]["due_string"], json!("Jun 1"));
        assert!(rendered["task_duration"].is_null());
    }

    #[test]
    fn project_sections_are_prefixed() {
        let mut project = Project::new("Home");
        project.add_task("Garden", Task { content: "Mow".into(), ..Task::default() });

        let rendered = render_project(&project);
        let sections: Vec<&str> =
            rendered["tasks"].as_object().expect("object").keys().map(String::as_str).collect();
        assert_eq!(sections, vec!["Section: -", "Section: Garden"]);
        assert_eq!(rendered["tasks"]["Section: Garden"][0]["task_content"], json!("Mow"));
    }

    #[test]
    fn comment_renders_attachment_and_lines() {
        let comment = Comment {
            content: "see\nattached".into(),
            posted_at: "2024-02-02T12:00:00Z".into(),
            attachment: Some(Attachment {
                file_type: Some("image/png".into()),
                file_url: Some("https://files.example/x/shot.png".into()),
                resource_type: Some("file".into()),
                local_file_name: None,
            }),
        };

        let rendered = render_comment(&comment);
        assert_eq!(rendered["content"], json!(["see", "attached"]));
        assert_eq!(rendered["date"], json!("2024-02-02T12:00:00Z"));
        assert_eq!(rendered["attachment"]["file_type"], json!("image/png"));
        assert!(rendered["attachment"]["local_file_name"].is_null());
    }
}
