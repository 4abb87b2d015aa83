//! Comment attachment download.

use std::fs;
use std::path::Path;

use crate::fetch::{FileSource, Transfer};
use crate::logging::ExportLogger;

/// `comment_<comment-id>_attachment_<basename-of-url>`
pub fn local_file_name(comment_id: &str, file_url: &str) -> String {
    let basename = file_url.rsplit('/').next().unwrap_or(file_url);
    format!("comment_{comment_id}_attachment_{basename}")
}

/// Materialises attachments in the export directory, at most once per
/// destination file.
pub struct AttachmentResolver<'a> {
    token: &'a str,
    directory: &'a Path,
    source: &'a dyn FileSource,
    logger: &'a dyn ExportLogger,
}

impl<'a> AttachmentResolver<'a> {
    pub fn new(
        token: &'a str,
        directory: &'a Path,
        source: &'a dyn FileSource,
        logger: &'a dyn ExportLogger,
    ) -> Self {
        Self { token, directory, source, logger }
    }

    /// Download the attachment unless it is already on disk and return its
    /// local file name.
    ///
    /// The name is returned even when the transfer fails; the failure is
    /// logged and not retried.
    pub fn resolve(&self, comment_id: &str, file_url: &str) -> String {
        let file_name = local_file_name(comment_id, file_url);
        let destination = self.directory.join(&file_name);
        if destination.is_file() {
            self.logger.debug(&format!("'{}' already exists, skipping", destination.display()));
            return file_name;
        }

        match self.source.download(file_url, self.token, &destination) {
            Ok(Transfer::Saved { bytes }) => self
                .logger
                .info(&format!("downloaded '{}' ({bytes} bytes)", destination.display())),
            Ok(Transfer::Rejected { status, body }) => self
                .logger
                .error(&format!("failed to download {file_url}: {status} - {body}")),
            Err(err) => {
                self.logger.error(&format!("failed to download {file_url}: {err}"));
                self.discard_partial(&destination);
            }
        }
        file_name
    }

    /// A failed transfer must not leave a file that later runs would take
    /// for a finished download.
    fn discard_partial(&self, destination: &Path) {
        if !destination.exists() {
            return;
        }
        if let Err(err) = fs::remove_file(destination) {
            self.logger
                .warn(&format!("could not remove partial '{}': {err}", destination.display()));
        }
    }
}
