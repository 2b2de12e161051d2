//! Placement state: which tags sit in the pool versus the answer area.
//!
//! Moves transfer owned values between the two vectors, so every loaded tag
//! is in exactly one area at all times and the union is always the full
//! tag set.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;
use crate::grading::{GradeResult, Mark};
use crate::model::Tag;

/// The two places a tag can live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Pool,
    Answer,
}

impl Area {
    /// The other area.
    pub fn opposite(self) -> Area {
        match self {
            Area::Pool => Area::Answer,
            Area::Answer => Area::Pool,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Pool => write!(f, "tag pool"),
            Area::Answer => write!(f, "answer area"),
        }
    }
}

impl FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pool" => Ok(Area::Pool),
            "answer" | "answer-area" => Ok(Area::Answer),
            other => Err(format!("unknown area: {other}")),
        }
    }
}

/// Which tags currently reside where, plus any marks grading attached.
#[derive(Debug, Clone, Default)]
pub struct QuizState {
    pool: Vec<Tag>,
    answer: Vec<Tag>,
    marks: HashMap<String, Mark>,
}

impl QuizState {
    /// Install a fresh tag set: everything in the pool, nothing marked.
    pub fn install(tags: Vec<Tag>) -> Self {
        Self {
            pool: tags,
            answer: Vec::new(),
            marks: HashMap::new(),
        }
    }

    /// Tags currently in the pool, in display order.
    pub fn pool(&self) -> &[Tag] {
        &self.pool
    }

    /// Tags currently in the answer area, in placement order.
    pub fn answer(&self) -> &[Tag] {
        &self.answer
    }

    /// The grading mark attached to `label`, if any.
    pub fn mark(&self, label: &str) -> Option<Mark> {
        self.marks.get(label).copied()
    }

    /// Which area `label` currently occupies.
    pub fn area_of(&self, label: &str) -> Option<Area> {
        if self.pool.iter().any(|t| t.label == label) {
            Some(Area::Pool)
        } else if self.answer.iter().any(|t| t.label == label) {
            Some(Area::Answer)
        } else {
            None
        }
    }

    /// True when `label` is loaded, in either area.
    pub fn contains(&self, label: &str) -> bool {
        self.area_of(label).is_some()
    }

    /// Total number of tags across both areas.
    pub fn len(&self) -> usize {
        self.pool.len() + self.answer.len()
    }

    /// True when no tags are loaded at all.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty() && self.answer.is_empty()
    }

    /// Every label, pool first then answer area.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.pool
            .iter()
            .chain(self.answer.iter())
            .map(|t| t.label.as_str())
    }

    /// Move the tag with `label` into `target`, appending it at the tail.
    ///
    /// Moving a tag back to the pool clears any grading mark it carried.
    pub fn move_tag(&mut self, label: &str, target: Area) -> Result<(), QuizError> {
        let source = target.opposite();
        let Some(index) = self
            .area_slice(source)
            .iter()
            .position(|t| t.label == label)
        else {
            // Not in the source area: distinguish "already there" from
            // "not in this quiz at all".
            if self.area_slice(target).iter().any(|t| t.label == label) {
                return Err(QuizError::AlreadyPlaced {
                    label: label.to_string(),
                    area: target,
                });
            }
            return Err(QuizError::UnknownTag {
                label: label.to_string(),
            });
        };

        let tag = match source {
            Area::Pool => self.pool.remove(index),
            Area::Answer => self.answer.remove(index),
        };
        if target == Area::Pool {
            self.marks.remove(&tag.label);
        }
        match target {
            Area::Pool => self.pool.push(tag),
            Area::Answer => self.answer.push(tag),
        }
        Ok(())
    }

    /// Move the tag to whichever area it is not in; returns the new area.
    pub fn toggle(&mut self, label: &str) -> Result<Area, QuizError> {
        let target = match self.area_of(label) {
            Some(area) => area.opposite(),
            None => {
                return Err(QuizError::UnknownTag {
                    label: label.to_string(),
                })
            }
        };
        self.move_tag(label, target)?;
        Ok(target)
    }

    /// Return every answer-area tag to the pool and clear all marks.
    ///
    /// Returned tags are appended at the pool tail in answer-area order;
    /// the existing pool order is untouched. Calling this twice has the
    /// same effect as calling it once.
    pub fn reset(&mut self) {
        self.pool.append(&mut self.answer);
        self.marks.clear();
    }

    /// Reorder the pool uniformly at random (Fisher-Yates).
    ///
    /// Answer-area membership and order are unaffected.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
    }

    /// Attach the per-tag outcomes of a grading, replacing earlier marks.
    pub(crate) fn set_marks(&mut self, result: &GradeResult) {
        self.marks = result
            .outcomes
            .iter()
            .map(|(label, mark)| (label.clone(), *mark))
            .collect();
    }

    fn area_slice(&self, area: Area) -> &[Tag] {
        match area {
            Area::Pool => &self.pool,
            Area::Answer => &self.answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::grade;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tag(label: &str, correct: bool) -> Tag {
        Tag {
            label: label.into(),
            correct,
            feedback: String::new(),
        }
    }

    fn state_of(labels: &[&str]) -> QuizState {
        QuizState::install(labels.iter().map(|l| tag(l, false)).collect())
    }

    #[test]
    fn area_display_and_parse() {
        assert_eq!(Area::Pool.to_string(), "tag pool");
        assert_eq!(Area::Answer.to_string(), "answer area");
        assert_eq!("pool".parse::<Area>().unwrap(), Area::Pool);
        assert_eq!("Answer".parse::<Area>().unwrap(), Area::Answer);
        assert_eq!("answer-area".parse::<Area>().unwrap(), Area::Answer);
        assert!("shelf".parse::<Area>().is_err());
    }

    #[test]
    fn install_puts_everything_in_the_pool() {
        let state = state_of(&["a", "b", "c"]);
        assert_eq!(state.pool().len(), 3);
        assert!(state.answer().is_empty());
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn move_appends_at_the_target_tail() {
        let mut state = state_of(&["a", "b", "c"]);
        state.move_tag("b", Area::Answer).unwrap();
        state.move_tag("a", Area::Answer).unwrap();
        let placed: Vec<&str> = state.answer().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(placed, ["b", "a"]);
        let pooled: Vec<&str> = state.pool().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(pooled, ["c"]);
    }

    #[test]
    fn move_rejects_unknown_labels() {
        let mut state = state_of(&["a"]);
        let err = state.move_tag("zzz", Area::Answer).unwrap_err();
        assert!(matches!(err, QuizError::UnknownTag { .. }));
        assert!(state.contains("a"));
        assert!(!state.contains("zzz"));
    }

    #[test]
    fn move_rejects_tags_already_in_the_target() {
        let mut state = state_of(&["a", "b"]);
        state.move_tag("a", Area::Answer).unwrap();
        let err = state.move_tag("a", Area::Answer).unwrap_err();
        assert!(matches!(err, QuizError::AlreadyPlaced { .. }));
        // Nothing moved or vanished.
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn toggle_walks_a_tag_back_and_forth() {
        let mut state = state_of(&["a", "b"]);
        assert_eq!(state.toggle("a").unwrap(), Area::Answer);
        assert_eq!(state.area_of("a"), Some(Area::Answer));
        assert_eq!(state.toggle("a").unwrap(), Area::Pool);
        assert_eq!(state.area_of("a"), Some(Area::Pool));
    }

    #[test]
    fn moving_out_of_the_answer_area_clears_the_mark() {
        let all = vec![tag("a", true), tag("b", false)];
        let mut state = QuizState::install(all.clone());
        state.move_tag("b", Area::Answer).unwrap();
        state.set_marks(&grade(state.answer(), &all));
        assert_eq!(state.mark("b"), Some(Mark::Incorrect));

        state.move_tag("b", Area::Pool).unwrap();
        assert_eq!(state.mark("b"), None);
    }

    #[test]
    fn reset_appends_answer_tags_in_placement_order() {
        let mut state = state_of(&["a", "b", "c"]);
        state.move_tag("c", Area::Answer).unwrap();
        state.move_tag("b", Area::Answer).unwrap();
        state.reset();
        let pooled: Vec<&str> = state.pool().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(pooled, ["a", "c", "b"]);
        assert!(state.answer().is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut state = state_of(&["a", "b"]);
        state.move_tag("a", Area::Answer).unwrap();
        state.reset();
        let once: Vec<String> = state.pool().iter().map(|t| t.label.clone()).collect();
        state.reset();
        let twice: Vec<String> = state.pool().iter().map(|t| t.label.clone()).collect();
        assert_eq!(once, twice);
        assert!(state.answer().is_empty());
    }

    #[test]
    fn reset_clears_all_marks() {
        let all = vec![tag("a", true), tag("b", false)];
        let mut state = QuizState::install(all.clone());
        state.move_tag("a", Area::Answer).unwrap();
        state.move_tag("b", Area::Answer).unwrap();
        state.set_marks(&grade(state.answer(), &all));
        state.reset();
        assert_eq!(state.mark("a"), None);
        assert_eq!(state.mark("b"), None);
    }

    #[test]
    fn shuffle_reorders_only_the_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = state_of(&["a", "b", "c", "d", "e", "f"]);
        state.move_tag("a", Area::Answer).unwrap();
        state.shuffle(&mut rng);

        let placed: Vec<&str> = state.answer().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(placed, ["a"]);

        let mut pooled: Vec<&str> = state.pool().iter().map(|t| t.label.as_str()).collect();
        pooled.sort_unstable();
        assert_eq!(pooled, ["b", "c", "d", "e", "f"]);
    }

    #[test]
    fn random_walk_never_loses_or_duplicates_tags() {
        let labels = ["a", "b", "c", "d", "e"];
        let mut rng = StdRng::seed_from_u64(17);
        let mut state = state_of(&labels);
        let mut expected: Vec<&str> = labels.to_vec();
        expected.sort_unstable();

        for _ in 0..500 {
            match rng.gen_range(0..10) {
                0 => state.reset(),
                1 => state.shuffle(&mut rng),
                _ => {
                    let label = labels[rng.gen_range(0..labels.len())];
                    let _ = state.toggle(label);
                }
            }
            let mut seen: Vec<&str> = state.labels().collect();
            seen.sort_unstable();
            assert_eq!(seen, expected);
        }
    }
}
