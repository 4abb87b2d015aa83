//! Blocking HTTP client for the Todoist API.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

use super::{FileSource, TodoistApi, Transfer};
use crate::domain::{CommentRecord, ProjectRecord, SectionRecord, TaskRecord};
use crate::error::ExportError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.todoist.com/api/v1";

const PAGE_LIMIT: &str = "200";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A listing response: either a cursor page or, for older endpoints, a
/// bare array holding the whole collection.
#[derive(Deserialize)]
#[serde(untagged)]
enum Page<T> {
    Cursor {
        results: Vec<T>,
        #[serde(default)]
        next_cursor: Option<String>,
    },
    Plain(Vec<T>),
}

/// Parse one listing body into its items and the cursor of the next page.
pub fn parse_page<T: DeserializeOwned>(body: &str) -> Result<(Vec<T>, Option<String>), ExportError> {
    let page = match serde_json::from_str::<Page<T>>(body)? {
        Page::Cursor { results, next_cursor } => {
            (results, next_cursor.filter(|cursor| !cursor.is_empty()))
        }
        Page::Plain(items) => (items, None),
    };
    Ok(page)
}

pub struct RestClient {
    http: Client,
    base_url: String,
    token: String,
}

impl RestClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ExportError> {
        let http = Client::builder()
            .user_agent(concat!("todoist-export/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Collect every page of `path`, following `next_cursor`.
    fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ExportError> {
        let url = format!("{}/{path}", self.base_url);
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .bearer_auth(&self.token)
                .query(query)
                .query(&[("limit", PAGE_LIMIT)]);
            if let Some(cursor) = &cursor {
                request = request.query(&[("cursor", cursor.as_str())]);
            }

            let response = request.send()?;
            let status = response.status();
            let body = response.text()?;
            if !status.is_success() {
                return Err(ExportError::Status { status: status.as_u16(), body });
            }

            let (page, next) = parse_page(&body)?;
            items.extend(page);
            match next {
                Some(next) => cursor = Some(next),
                None => return Ok(items),
            }
        }
    }
}

impl TodoistApi for RestClient {
    fn projects(&self) -> Result<Vec<ProjectRecord>, ExportError> {
        self.list("projects", &[])
    }

    fn tasks(&self) -> Result<Vec<TaskRecord>, ExportError> {
        self.list("tasks", &[])
    }

    fn sections(&self) -> Result<Vec<SectionRecord>, ExportError> {
        self.list("sections", &[])
    }

    fn comments(&self, task_id: &str) -> Result<Vec<CommentRecord>, ExportError> {
        self.list("comments", &[("task_id", task_id)])
    }
}

impl FileSource for RestClient {
    fn download(
        &self,
        url: &str,
        token: &str,
        destination: &Path,
    ) -> Result<Transfer, ExportError> {
        let mut response = self.http.get(url).bearer_auth(token).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Ok(Transfer::Rejected { status: status.as_u16(), body });
        }

        // The body lands in a sibling temp file and only replaces the
        // destination once it is complete; an interrupted stream leaves nothing.
        let directory =
            destination.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let mut partial = NamedTempFile::new_in(directory)?;
        let bytes = response.copy_to(partial.as_file_mut())?;
        partial.persist(destination).map_err(|err| err.error)?;
        Ok(Transfer::Saved { bytes })
    }
}
