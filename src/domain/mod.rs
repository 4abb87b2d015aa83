//! Core data types: API records as fetched and tree nodes as exported.

pub mod model;
pub mod records;

pub use model::{
    Attachment, Comment, DueDate, Export, ExportStats, Project, Task, TaskDuration,
    DEFAULT_SECTION,
};
pub use records::{
    AttachmentRecord, CommentRecord, DueRecord, DurationRecord, ProjectRecord, SectionRecord,
    TaskRecord,
};
