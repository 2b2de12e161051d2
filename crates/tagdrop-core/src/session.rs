//! The quiz session: one interactive quiz's worth of state and its
//! lifecycle.
//!
//! A session ties the tag pool, placement state, and grading engine
//! together behind the intents a rendering surface is allowed to issue.
//! All mutation goes through `&mut self`, so intents are serialized by
//! construction. The one asynchronous boundary, fetching tag data, is
//! guarded by an epoch check: a fetch that resolves after a reset or a
//! newer load is discarded silently.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{LoadError, QuizError, SourceError};
use crate::grading::{self, GradeResult, Mark};
use crate::model::{Quiz, Tag, TagRecord, DEFAULT_QUESTION};
use crate::state::{Area, QuizState};
use crate::traits::TagSource;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// A tag fetch is outstanding; placement intents are rejected.
    Loading,
    /// Tags can be placed freely; no marks are shown.
    Ready,
    /// Marks are attached; tags can still be moved and regraded.
    Graded,
    /// Loading failed before any tag set was installed.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Loading => write!(f, "loading"),
            Phase::Ready => write!(f, "ready"),
            Phase::Graded => write!(f, "graded"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

/// Proof that a load was begun; redeem with [`QuizSession::complete_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

/// What [`QuizSession::complete_load`] did with a fetched result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The tag set was installed and the session is ready.
    Installed { tag_count: usize },
    /// The result arrived after a reset or a newer load; nothing changed.
    Stale,
}

/// A single interactive quiz: definition, placement, phase, and grading.
pub struct QuizSession {
    id: Uuid,
    quiz: Quiz,
    state: QuizState,
    phase: Phase,
    /// Phase to fall back to when a reload fails but old data survives.
    resume_phase: Phase,
    /// Bumped by `begin_load`, `reset`, and ticket redemption; a stale
    /// ticket mismatches.
    epoch: u64,
    /// Set once a tag set is installed; an empty document counts.
    loaded: bool,
    rng: StdRng,
    load_error: Option<String>,
    last_grade: Option<GradeResult>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Start a session over an already-validated quiz; immediately ready,
    /// with the pool shuffled.
    pub fn new(quiz: Quiz) -> Self {
        Self::build(quiz, StdRng::from_entropy(), Phase::Ready)
    }

    /// Like [`QuizSession::new`], but with a fixed shuffle seed so the pool
    /// order is reproducible.
    pub fn seeded(quiz: Quiz, seed: u64) -> Self {
        Self::build(quiz, StdRng::seed_from_u64(seed), Phase::Ready)
    }

    /// Start a session that will receive its tags from a source.
    ///
    /// The session begins in [`Phase::Loading`] with an empty tag set;
    /// follow up with [`QuizSession::load_from`] or the
    /// [`QuizSession::begin_load`] / [`QuizSession::complete_load`] pair.
    pub fn pending(
        id: impl Into<String>,
        question: Option<String>,
        image: Option<String>,
    ) -> Self {
        Self::build(
            Self::empty_quiz(id, question, image),
            StdRng::from_entropy(),
            Phase::Loading,
        )
    }

    /// Like [`QuizSession::pending`], but with a fixed shuffle seed.
    pub fn pending_seeded(
        id: impl Into<String>,
        question: Option<String>,
        image: Option<String>,
        seed: u64,
    ) -> Self {
        Self::build(
            Self::empty_quiz(id, question, image),
            StdRng::seed_from_u64(seed),
            Phase::Loading,
        )
    }

    fn empty_quiz(id: impl Into<String>, question: Option<String>, image: Option<String>) -> Quiz {
        Quiz {
            id: id.into(),
            question: question.unwrap_or_else(|| DEFAULT_QUESTION.to_string()),
            image,
            tags: Vec::new(),
        }
    }

    fn build(quiz: Quiz, rng: StdRng, phase: Phase) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            state: QuizState::install(quiz.tags.clone()),
            quiz,
            phase,
            resume_phase: phase,
            epoch: 0,
            loaded: phase == Phase::Ready,
            rng,
            load_error: None,
            last_grade: None,
            started_at: Utc::now(),
        };
        if session.phase == Phase::Ready {
            session.state.shuffle(&mut session.rng);
        }
        session
    }

    /// Begin a (re)load: supersede any outstanding fetch and enter
    /// [`Phase::Loading`].
    ///
    /// Existing tags are retained until a load succeeds, so a failed or
    /// abandoned fetch never disturbs the current placement.
    pub fn begin_load(&mut self) -> LoadTicket {
        if self.phase != Phase::Loading {
            self.resume_phase = self.phase;
        }
        self.epoch += 1;
        self.phase = Phase::Loading;
        tracing::debug!(session = %self.id, epoch = self.epoch, "beginning tag load");
        LoadTicket { epoch: self.epoch }
    }

    /// Apply the outcome of a fetch begun with [`QuizSession::begin_load`].
    ///
    /// A ticket from a superseded epoch is discarded without touching any
    /// state: the session was reset or reloaded while the fetch was in
    /// flight, and the late result no longer has an audience. Each ticket
    /// redeems at most once; delivering it a second time is discarded the
    /// same way.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<Vec<TagRecord>, SourceError>,
    ) -> Result<LoadOutcome, LoadError> {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                session = %self.id,
                ticket_epoch = ticket.epoch,
                current_epoch = self.epoch,
                "discarding stale load result"
            );
            return Ok(LoadOutcome::Stale);
        }

        // Redemption consumes the ticket; a duplicate delivery is stale.
        self.epoch += 1;

        let records = match fetched {
            Ok(records) => records,
            Err(err) => return Err(self.fail_load(err.into())),
        };

        let quiz = match Quiz::from_records(
            self.quiz.id.clone(),
            Some(self.quiz.question.clone()),
            self.quiz.image.clone(),
            records,
        ) {
            Ok(quiz) => quiz,
            Err(err) => return Err(self.fail_load(err.into())),
        };

        let tag_count = quiz.tag_count();
        self.state = QuizState::install(quiz.tags.clone());
        self.state.shuffle(&mut self.rng);
        self.quiz = quiz;
        self.phase = Phase::Ready;
        self.resume_phase = Phase::Ready;
        self.loaded = true;
        self.load_error = None;
        self.last_grade = None;
        tracing::debug!(session = %self.id, tag_count, "installed tag set");
        Ok(LoadOutcome::Installed { tag_count })
    }

    /// Fetch from `source` and install the result in one step.
    ///
    /// Holding `&mut self` across the await means no other intent can
    /// interleave, so the outcome here is never stale. Event loops that do
    /// interleave intents with fetches should use the ticket pair instead.
    pub async fn load_from(&mut self, source: &dyn TagSource) -> Result<usize, LoadError> {
        tracing::info!(session = %self.id, source = %source.describe(), "loading tags");
        let ticket = self.begin_load();
        let fetched = source.fetch_tags().await;
        match self.complete_load(ticket, fetched)? {
            LoadOutcome::Installed { tag_count } => Ok(tag_count),
            LoadOutcome::Stale => Ok(0),
        }
    }

    /// Replace the working tag set from already-fetched records.
    pub fn load_records(&mut self, records: Vec<TagRecord>) -> Result<usize, LoadError> {
        let ticket = self.begin_load();
        match self.complete_load(ticket, Ok(records))? {
            LoadOutcome::Installed { tag_count } => Ok(tag_count),
            LoadOutcome::Stale => Ok(0),
        }
    }

    /// Record a failed load and settle the phase.
    fn fail_load(&mut self, err: LoadError) -> LoadError {
        tracing::warn!(session = %self.id, error = %err, "tag load failed");
        if self.loaded {
            // A reload failed but the installed tag set is intact: stay
            // where we were and let only the caller see the error.
            self.phase = self.resume_phase;
        } else {
            self.phase = Phase::Failed;
            self.load_error = Some(err.to_string());
        }
        err
    }

    /// Move one tag into `target`.
    pub fn move_tag(&mut self, label: &str, target: Area) -> Result<(), QuizError> {
        self.ensure_interactive()?;
        self.state.move_tag(label, target)
    }

    /// Move one tag to the opposite area; returns where it ended up.
    pub fn toggle(&mut self, label: &str) -> Result<Area, QuizError> {
        self.ensure_interactive()?;
        self.state.toggle(label)
    }

    /// Grade the current placement and attach marks for display.
    pub fn grade(&mut self) -> Result<GradeResult, QuizError> {
        self.ensure_interactive()?;
        let result = grading::grade(self.state.answer(), &self.quiz.tags);
        self.state.set_marks(&result);
        self.last_grade = Some(result.clone());
        self.phase = Phase::Graded;
        tracing::debug!(
            session = %self.id,
            placed = result.outcomes.len(),
            all_correct = result.all_correct,
            "graded placement"
        );
        Ok(result)
    }

    /// Return every tag to the pool, clear marks, and go back to ready.
    ///
    /// Also supersedes any outstanding fetch; its late result will be
    /// discarded when it arrives. Does not reshuffle the pool; callers
    /// that want fresh order follow up with [`QuizSession::shuffle`].
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state.reset();
        self.last_grade = None;
        self.phase = if self.loaded {
            Phase::Ready
        } else {
            Phase::Failed
        };
        self.resume_phase = self.phase;
        tracing::debug!(session = %self.id, "reset placement");
    }

    /// Reshuffle the pool's display order.
    pub fn shuffle(&mut self) -> Result<(), QuizError> {
        self.ensure_interactive()?;
        self.state.shuffle(&mut self.rng);
        Ok(())
    }

    fn ensure_interactive(&self) -> Result<(), QuizError> {
        match self.phase {
            Phase::Ready | Phase::Graded => Ok(()),
            phase => Err(QuizError::Locked(phase)),
        }
    }

    /// Unique identifier of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The question shown above the tag pool.
    pub fn question(&self) -> &str {
        &self.quiz.question
    }

    /// Optional image reference displayed with the question.
    pub fn image(&self) -> Option<&str> {
        self.quiz.image.as_deref()
    }

    /// The underlying quiz definition.
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Tags currently in the pool, in display order.
    pub fn pool(&self) -> &[Tag] {
        self.state.pool()
    }

    /// Tags currently in the answer area, in placement order.
    pub fn answer(&self) -> &[Tag] {
        self.state.answer()
    }

    /// The grading mark attached to `label`, if any.
    pub fn mark(&self, label: &str) -> Option<Mark> {
        self.state.mark(label)
    }

    /// Total number of loaded tags.
    pub fn tag_count(&self) -> usize {
        self.state.len()
    }

    /// The error message from a load that left the session failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// The most recent grading result, if the session has been graded.
    pub fn last_grade(&self) -> Option<&GradeResult> {
        self.last_grade.as_ref()
    }

    /// When this session was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
