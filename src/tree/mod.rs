//! Flat-to-tree reconstruction.
//!
//! The API returns projects, tasks and sections as flat lists that point at
//! each other by id. [`build_forest`] turns them into an ownership forest in
//! two passes over an index arena:
//!
//! 1. every record becomes a slot, and ids are indexed to slot positions;
//! 2. parent references are resolved by id and recorded as child indices.
//!
//! Slots are then moved out of the arena, starting from the roots, into the
//! owned [`Export`] tree. Every id lookup is fallible; an id that does not
//! resolve aborts the build with [`ExportError::UnknownId`].

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::domain::{
    Comment, DueDate, Export, Project, ProjectRecord, SectionRecord, Task, TaskDuration,
    TaskRecord, DEFAULT_SECTION,
};
use crate::error::{ExportError, IdKind};

struct ProjectSlot {
    id: String,
    parent_id: Option<String>,
    node: Option<Project>,
    /// Section label to task slot indices.
    buckets: IndexMap<String, Vec<usize>>,
    children: Vec<usize>,
}

struct TaskSlot {
    id: String,
    project_id: String,
    parent_id: Option<String>,
    section_id: Option<String>,
    node: Option<Task>,
    children: Vec<usize>,
}

/// Build the export forest from fetched records.
///
/// `comments` maps task ids to their already-resolved comments; tasks
/// without an entry get none. Bucket and child order follow the order of
/// the input slices.
pub fn build_forest(
    projects: &[ProjectRecord],
    tasks: &[TaskRecord],
    sections: &[SectionRecord],
    mut comments: HashMap<String, Vec<Comment>>,
) -> Result<Export, ExportError> {
    let mut project_slots: Vec<ProjectSlot> = projects.iter().map(project_slot).collect();
    let project_index = index_by_id(project_slots.iter().map(|slot| slot.id.as_str()));

    let mut task_slots: Vec<TaskSlot> = tasks
        .iter()
        .map(|record| task_slot(record, comments.remove(&record.id).unwrap_or_default()))
        .collect();
    let task_index = index_by_id(task_slots.iter().map(|slot| slot.id.as_str()));

    let section_names: HashMap<&str, &str> =
        sections.iter().map(|s| (s.id.as_str(), s.name.as_str())).collect();

    let mut roots = Vec::new();
    for idx in 0..project_slots.len() {
        let Some(parent_id) = project_slots[idx].parent_id.clone() else {
            roots.push(idx);
            continue;
        };
        let referrer = format!("project '{}'", project_slots[idx].id);
        let parent = lookup(&project_index, IdKind::Project, &parent_id, &referrer)?;
        project_slots[parent].children.push(idx);
    }

    for idx in 0..task_slots.len() {
        let slot = &task_slots[idx];
        let referrer = format!("task '{}'", slot.id);
        match slot.parent_id.clone() {
            Some(parent_id) => {
                let parent = lookup(&task_index, IdKind::Task, &parent_id, &referrer)?;
                task_slots[parent].children.push(idx);
            }
            None => {
                let project = lookup(&project_index, IdKind::Project, &slot.project_id, &referrer)?;
                let label = match &slot.section_id {
                    Some(section_id) => section_names
                        .get(section_id.as_str())
                        .copied()
                        .ok_or_else(|| unknown(IdKind::Section, section_id, &referrer))?,
                    None => DEFAULT_SECTION,
                };
                project_slots[project].buckets.entry(label.to_string()).or_default().push(idx);
            }
        }
    }

    let mut export = Export::new();
    for root in roots {
        let project = take_project(&mut project_slots, &mut task_slots, root)?;
        export.add_project(project);
    }

    // Anything still in the arena was never reachable from a root.
    if let Some(slot) = project_slots.iter().find(|slot| slot.node.is_some()) {
        return Err(ExportError::ParentCycle { kind: IdKind::Project, id: slot.id.clone() });
    }
    if let Some(slot) = task_slots.iter().find(|slot| slot.node.is_some()) {
        return Err(ExportError::ParentCycle { kind: IdKind::Task, id: slot.id.clone() });
    }

    Ok(export)
}

fn project_slot(record: &ProjectRecord) -> ProjectSlot {
    let mut buckets = IndexMap::new();
    buckets.insert(DEFAULT_SECTION.to_string(), Vec::new());
    ProjectSlot {
        id: record.id.clone(),
        parent_id: record.parent_id.clone(),
        node: Some(Project::new(record.name.clone())),
        buckets,
        children: Vec::new(),
    }
}

fn task_slot(record: &TaskRecord, comments: Vec<Comment>) -> TaskSlot {
    let task = Task {
        created_at: record.created_at.clone(),
        content: record.content.clone(),
        description: record.description.clone(),
        priority: record.priority,
        due: record.due.as_ref().map(|due| DueDate {
            date: due.date.clone(),
            is_recurring: due.is_recurring,
            due_string: due.string.clone(),
        }),
        duration: record
            .duration
            .as_ref()
            .map(|d| TaskDuration { amount: d.amount, unit: d.unit.clone() }),
        labels: record.labels.clone(),
        child_tasks: Vec::new(),
        comments,
    };
    TaskSlot {
        id: record.id.clone(),
        project_id: record.project_id.clone(),
        parent_id: record.parent_id.clone(),
        section_id: record.section_id.clone(),
        node: Some(task),
        children: Vec::new(),
    }
}

/// Map ids to slot positions. On duplicate ids the first record wins.
fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        index.entry(id.to_string()).or_insert(position);
    }
    index
}

fn lookup(
    index: &HashMap<String, usize>,
    kind: IdKind,
    id: &str,
    referrer: &str,
) -> Result<usize, ExportError> {
    index.get(id).copied().ok_or_else(|| unknown(kind, id, referrer))
}

fn unknown(kind: IdKind, id: &str, referrer: &str) -> ExportError {
    ExportError::UnknownId { kind, id: id.to_string(), referrer: referrer.to_string() }
}

fn take_project(
    project_slots: &mut [ProjectSlot],
    task_slots: &mut [TaskSlot],
    idx: usize,
) -> Result<Project, ExportError> {
    let slot = &mut project_slots[idx];
    let mut project = slot
        .node
        .take()
        .ok_or_else(|| ExportError::ParentCycle { kind: IdKind::Project, id: slot.id.clone() })?;
    let buckets = std::mem::take(&mut slot.buckets);
    let children = std::mem::take(&mut slot.children);

    for (label, task_indices) in buckets {
        // Materialise empty buckets too so the default one keeps its place.
        project.sections.entry(label.clone()).or_default();
        for task_idx in task_indices {
            let task = take_task(task_slots, task_idx)?;
            project.add_task(&label, task);
        }
    }
    for child in children {
        let child_project = take_project(project_slots, task_slots, child)?;
        project.add_child_project(child_project);
    }
    Ok(project)
}

fn take_task(task_slots: &mut [TaskSlot], idx: usize) -> Result<Task, ExportError> {
    let slot = &mut task_slots[idx];
    let mut task = slot
        .node
        .take()
        .ok_or_else(|| ExportError::ParentCycle { kind: IdKind::Task, id: slot.id.clone() })?;
    let children = std::mem::take(&mut slot.children);
    for child in children {
        let child_task = take_task(task_slots, child)?;
        task.add_child_task(child_task);
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, name: &str, parent: Option<&str>) -> ProjectRecord {
        ProjectRecord { id: id.into(), name: name.into(), parent_id: parent.map(Into::into) }
    }

    fn task(id: &str, project_id: &str, parent: Option<&str>, section: Option<&str>) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            project_id: project_id.into(),
            parent_id: parent.map(Into::into),
            section_id: section.map(Into::into),
            content: format!("task {id}"),
            priority: 1,
            ..TaskRecord::default()
        }
    }

    fn section(id: &str, project_id: &str, name: &str) -> SectionRecord {
        SectionRecord { id: id.into(), project_id: project_id.into(), order: 1, name: name.into() }
    }

    fn contents(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn child_task_is_owned_by_parent_only() {
        let export = build_forest(
            &[project("1", "A", None)],
            &[task("10", "1", None, None), task("11", "1", Some("10"), None)],
            &[],
            HashMap::new(),
        )
        .expect("forest");

        assert_eq!(export.projects.len(), 1);
        let a = &export.projects[0];
        let default_bucket = a.section(DEFAULT_SECTION).expect("default bucket");
        assert_eq!(contents(default_bucket), vec!["task 10"]);
        assert_eq!(contents(&default_bucket[0].child_tasks), vec!["task 11"]);
        assert_eq!(a.sections.len(), 1);
    }

    #[test]
    fn tasks_are_bucketed_by_section_name_in_fetch_order() {
        let export = build_forest(
            &[project("1", "Work", None)],
            &[
                task("10", "1", None, Some("s2")),
                task("11", "1", None, None),
                task("12", "1", None, Some("s1")),
                task("13", "1", None, Some("s2")),
            ],
            &[section("s1", "1", "Backlog"), section("s2", "1", "Doing")],
            HashMap::new(),
        )
        .expect("forest");

        let work = &export.projects[0];
        let labels: Vec<&str> = work.sections.keys().map(String::as_str).collect();
        assert_eq!(labels, vec![DEFAULT_SECTION, "Doing", "Backlog"]);
        assert_eq!(contents(work.section("Doing").unwrap()), vec!["task 10", "task 13"]);
        assert_eq!(contents(work.section(DEFAULT_SECTION).unwrap()), vec!["task 11"]);
        assert_eq!(contents(work.section("Backlog").unwrap()), vec!["task 12"]);
    }

    #[test]
    fn nested_projects_keep_discovery_order() {
        let export = build_forest(
            &[
                project("1", "Root A", None),
                project("2", "Child A1", Some("1")),
                project("3", "Root B", None),
                project("4", "Child A2", Some("1")),
                project("5", "Grandchild", Some("2")),
            ],
            &[],
            &[],
            HashMap::new(),
        )
        .expect("forest");

        let roots: Vec<&str> = export.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(roots, vec!["Root A", "Root B"]);
        let children: Vec<&str> =
            export.projects[0].child_projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(children, vec!["Child A1", "Child A2"]);
        assert_eq!(export.projects[0].child_projects[0].child_projects[0].name, "Grandchild");
    }

    #[test]
    fn children_listed_before_parent_still_attach() {
        let export = build_forest(
            &[project("2", "Child", Some("1")), project("1", "Parent", None)],
            &[task("21", "1", Some("20"), None), task("20", "1", None, None)],
            &[],
            HashMap::new(),
        )
        .expect("forest");

        assert_eq!(export.projects.len(), 1);
        assert_eq!(export.projects[0].child_projects[0].name, "Child");
        let top = export.projects[0].section(DEFAULT_SECTION).unwrap();
        assert_eq!(contents(top), vec!["task 20"]);
        assert_eq!(contents(&top[0].child_tasks), vec!["task 21"]);
    }

    #[test]
    fn comments_are_attached_to_their_task() {
        let mut comments = HashMap::new();
        comments.insert(
            "10".to_string(),
            vec![Comment { content: "first".into(), ..Comment::default() }],
        );
        let export = build_forest(
            &[project("1", "A", None)],
            &[task("10", "1", None, None), task("11", "1", None, None)],
            &[],
            comments,
        )
        .expect("forest");

        let tasks = export.projects[0].section(DEFAULT_SECTION).unwrap();
        assert_eq!(tasks[0].comments.len(), 1);
        assert!(tasks[1].comments.is_empty());
    }

    #[test]
    fn empty_collections_yield_empty_forest() {
        let export = build_forest(&[], &[], &[], HashMap::new()).expect("forest");
        assert!(export.projects.is_empty());
    }

    #[test]
    fn unknown_parent_project_is_fatal() {
        let err = build_forest(&[project("2", "Orphan", Some("99"))], &[], &[], HashMap::new())
            .expect_err("should fail");
        match err {
            ExportError::UnknownId { kind, id, .. } => {
                assert_eq!(kind, IdKind::Project);
                assert_eq!(id, "99");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_task_project_is_fatal() {
        let err = build_forest(
            &[project("1", "A", None)],
            &[task("10", "404", None, None)],
            &[],
            HashMap::new(),
        )
        .expect_err("should fail");
        assert!(matches!(err, ExportError::UnknownId { kind: IdKind::Project, .. }));
    }

    #[test]
    fn unknown_parent_task_is_fatal() {
        let err = build_forest(
            &[project("1", "A", None)],
            &[task("11", "1", Some("10"), None)],
            &[],
            HashMap::new(),
        )
        .expect_err("should fail");
        assert!(matches!(err, ExportError::UnknownId { kind: IdKind::Task, .. }));
    }

    #[test]
    fn unknown_section_is_fatal() {
        let err = build_forest(
            &[project("1", "A", None)],
            &[task("10", "1", None, Some("s9"))],
            &[section("s1", "1", "Backlog")],
            HashMap::new(),
        )
        .expect_err("should fail");
        match err {
            ExportError::UnknownId { kind, id, referrer } => {
                assert_eq!(kind, IdKind::Section);
                assert_eq!(id, "s9");
                assert_eq!(referrer, "task '10'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn task_parent_cycle_is_reported() {
        let err = build_forest(
            &[project("1", "A", None)],
            &[task("10", "1", Some("11"), None), task("11", "1", Some("10"), None)],
            &[],
            HashMap::new(),
        )
        .expect_err("should fail");
        assert!(matches!(err, ExportError::ParentCycle { kind: IdKind::Task, .. }));
    }

    #[test]
    fn project_parent_cycle_is_reported() {
        let err = build_forest(&[project("1", "Self", Some("1"))], &[], &[], HashMap::new())
            .expect_err("should fail");
        assert!(matches!(err, ExportError::ParentCycle { kind: IdKind::Project, .. }));
    }
}
