//! Quiz and source error types.
//!
//! These error types represent the ways loading, placement, and grading can
//! fail. Defined in `tagdrop-core` so sources and front ends share one
//! taxonomy and callers can classify failures without string matching.

use thiserror::Error;

use crate::session::Phase;
use crate::state::Area;

/// Errors raised by quiz data validation and placement intents.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A tag record had an empty label.
    #[error("tag record {index} has an empty label")]
    EmptyLabel { index: usize },

    /// Two tag records shared the same label.
    #[error("duplicate tag label \"{label}\"")]
    DuplicateLabel { label: String },

    /// A move referenced a label the quiz does not contain.
    #[error("no tag labeled \"{label}\" in this quiz")]
    UnknownTag { label: String },

    /// A move targeted the area the tag already occupies.
    #[error("tag \"{label}\" is already in the {area}")]
    AlreadyPlaced { label: String, area: Area },

    /// A placement or grading intent arrived while the session cannot
    /// accept one (still loading, or load failed with nothing installed).
    #[error("quiz is {0}; placement and grading are unavailable")]
    Locked(Phase),
}

impl QuizError {
    /// Returns `true` for load-time data validation failures, as opposed
    /// to rejected intents against an otherwise healthy quiz.
    pub fn is_invalid_data(&self) -> bool {
        matches!(
            self,
            QuizError::EmptyLabel { .. } | QuizError::DuplicateLabel { .. }
        )
    }
}

/// Errors raised while fetching a tag document from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The request could not be completed.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The document was fetched but is not a valid tag array.
    #[error("malformed tag document: {0}")]
    Malformed(String),

    /// A local document could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Returns `true` if retrying the same fetch could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Network(_) | SourceError::Timeout(_) => true,
            SourceError::Http { status, .. } => *status >= 500,
            SourceError::Malformed(_) | SourceError::Io { .. } => false,
        }
    }
}

/// Either half of a failed load: fetching the document, or validating the
/// records it contained.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Data(#[from] QuizError),
}
