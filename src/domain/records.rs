//! Flat records as returned by the Todoist API.
//!
//! Field aliases accept both the REST v2 names (`created_at`,
//! `comment_count`, `attachment`) and the unified v1 names (`added_at`,
//! `note_count`, `file_attachment`). Identifiers are kept as strings; older
//! payloads that carry numeric ids are normalised on the way in.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub project_id: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub section_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub parent_id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub due: Option<DueRecord>,
    #[serde(default)]
    pub duration: Option<DurationRecord>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, alias = "note_count")]
    pub comment_count: u32,
    #[serde(default, alias = "added_at")]
    pub created_at: String,
}

fn default_priority() -> i64 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DueRecord {
    pub date: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DurationRecord {
    pub amount: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub project_id: String,
    #[serde(default, alias = "section_order")]
    pub order: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommentRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub posted_at: String,
    #[serde(default, alias = "file_attachment")]
    pub attachment: Option<AttachmentRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttachmentRecord {
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
