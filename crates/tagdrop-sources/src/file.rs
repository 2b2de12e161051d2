//! Local-file tag-document source.

use std::path::PathBuf;

use async_trait::async_trait;

use tagdrop_core::error::SourceError;
use tagdrop_core::model::TagRecord;
use tagdrop_core::traits::{parse_tag_document, TagSource};

/// Reads a JSON tag document from the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TagSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_tags(&self) -> Result<Vec<TagRecord>, SourceError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_tag_document(&body)
    }
}
