//! The tag-source trait and the shared wire-document parser.
//!
//! Source implementations live in the `tagdrop-sources` crate; the trait is
//! defined here so the session can drive any of them without knowing which.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::TagRecord;

/// A place tag records can be fetched from.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Human-readable origin (a URL or path) for logs and error messages.
    fn describe(&self) -> String;

    /// Fetch the full tag document.
    async fn fetch_tags(&self) -> Result<Vec<TagRecord>, SourceError>;
}

/// Parse a wire-format tag document: a JSON array of tag records.
///
/// Accepts `text` as an alias for the `label` field; missing
/// `correct`/`feedback` fields default to false/empty.
pub fn parse_tag_document(body: &str) -> Result<Vec<TagRecord>, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))
}
