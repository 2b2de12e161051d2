//! Serializable board projection.
//!
//! A `BoardSnapshot` captures everything a rendering surface needs at one
//! instant, in a shape that serializes cleanly for machine consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tagdrop_core::grading::Mark;
use tagdrop_core::session::{Phase, QuizSession};

/// One answer-area slot: a label plus any mark grading attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSlot {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,
}

/// The full display state of a session, captured at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub session: Uuid,
    pub captured_at: DateTime<Utc>,
    pub phase: Phase,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Pool labels in display order.
    pub pool: Vec<String>,
    /// Answer-area slots in placement order.
    pub answer: Vec<AnswerSlot>,
    /// Overall verdict from the most recent grading, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

impl BoardSnapshot {
    /// Capture the current state of `session`.
    pub fn capture(session: &QuizSession) -> Self {
        Self {
            session: session.id(),
            captured_at: Utc::now(),
            phase: session.phase(),
            question: session.question().to_string(),
            image: session.image().map(str::to_string),
            pool: session.pool().iter().map(|t| t.label.clone()).collect(),
            answer: session
                .answer()
                .iter()
                .map(|t| AnswerSlot {
                    label: t.label.clone(),
                    mark: session.mark(&t.label),
                })
                .collect(),
            all_correct: session.last_grade().map(|g| g.all_correct),
            load_error: session.load_error().map(str::to_string),
        }
    }

    /// Pretty-printed JSON for machine consumers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
