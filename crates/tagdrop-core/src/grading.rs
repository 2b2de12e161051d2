//! Grading engine.
//!
//! Compares answer-area membership against each tag's correctness flag and
//! produces per-tag outcomes plus an overall verdict. Grading is a pure
//! function of its inputs; it never mutates placement state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::Tag;

/// The outcome attached to one placed tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Correct,
    Incorrect,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Correct => write!(f, "correct"),
            Mark::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// The result of grading one placement.
///
/// Derived data: recomputed on every grade, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    /// Per-tag outcome for every tag in the answer area, keyed by label.
    pub outcomes: BTreeMap<String, Mark>,
    /// True iff the answer area holds exactly the set of correct tags.
    pub all_correct: bool,
}

impl GradeResult {
    /// Number of placed tags marked correct.
    pub fn correct_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|m| **m == Mark::Correct)
            .count()
    }

    /// Number of placed tags marked incorrect.
    pub fn incorrect_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|m| **m == Mark::Incorrect)
            .count()
    }

    /// True when nothing was placed in the answer area.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Grade the current placement.
///
/// Each answer-area tag is marked by its own correctness flag. The overall
/// verdict checks set equality in both directions: every correct tag must
/// be placed, and nothing incorrect may be placed. An empty correct set is
/// satisfied only by an empty answer area.
pub fn grade(answer: &[Tag], all_tags: &[Tag]) -> GradeResult {
    let mut outcomes = BTreeMap::new();
    for tag in answer {
        let mark = if tag.correct {
            Mark::Correct
        } else {
            Mark::Incorrect
        };
        outcomes.insert(tag.label.clone(), mark);
    }

    let wanted: BTreeSet<&str> = all_tags
        .iter()
        .filter(|t| t.correct)
        .map(|t| t.label.as_str())
        .collect();
    let placed: BTreeSet<&str> = answer.iter().map(|t| t.label.as_str()).collect();

    GradeResult {
        all_correct: wanted == placed,
        outcomes,
    }
}
