//! Core data model types for tagdrop.
//!
//! These are the fundamental types that the entire tagdrop system uses to
//! represent candidate tags and validated quiz definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::QuizError;

/// Question text used when a quiz does not set one.
pub const DEFAULT_QUESTION: &str = "Which of the following tags apply?";

/// One tag as it appears in external documents, before validation.
///
/// Older tag documents spell the label field `text`; both spellings are
/// accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecord {
    /// Display label; must be unique within a quiz.
    #[serde(alias = "text")]
    pub label: String,
    /// Whether this tag belongs in the answer area.
    #[serde(default)]
    pub correct: bool,
    /// Feedback shown for this tag when the quiz is graded.
    #[serde(default)]
    pub feedback: String,
}

/// A validated candidate tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Display label, unique within its quiz.
    pub label: String,
    /// Whether this tag belongs in the answer area.
    pub correct: bool,
    /// Feedback shown for this tag when the quiz is graded.
    pub feedback: String,
}

/// A validated quiz definition: the master tag list plus display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// The question shown above the tag pool.
    pub question: String,
    /// Optional reference to an image displayed with the question.
    #[serde(default)]
    pub image: Option<String>,
    /// Master tag list in document order.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Quiz {
    /// Build a quiz from wire records, validating labels.
    ///
    /// Fails if any label is empty or duplicated. The input is rejected as
    /// a whole, so callers never observe a partially loaded quiz.
    pub fn from_records(
        id: impl Into<String>,
        question: Option<String>,
        image: Option<String>,
        records: Vec<TagRecord>,
    ) -> Result<Self, QuizError> {
        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if record.label.trim().is_empty() {
                return Err(QuizError::EmptyLabel { index });
            }
            if !seen.insert(record.label.clone()) {
                return Err(QuizError::DuplicateLabel {
                    label: record.label,
                });
            }
            tags.push(Tag {
                label: record.label,
                correct: record.correct,
                feedback: record.feedback,
            });
        }
        Ok(Self {
            id: id.into(),
            question: question.unwrap_or_else(|| DEFAULT_QUESTION.to_string()),
            image,
            tags,
        })
    }

    /// Number of tags in this quiz.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// True when the quiz holds no tags at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags flagged correct.
    pub fn correct_count(&self) -> usize {
        self.tags.iter().filter(|t| t.correct).count()
    }

    /// Look up a tag by label.
    pub fn tag(&self, label: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.label == label)
    }
}
