use log::{debug, info};
use std::time::{Duration, Instant};

use crate::exercise::{DifficultyFilter, Exercise, ExerciseCategory, Response};
use crate::summary::SessionSummary;
use crate::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No category chosen yet
    Selecting,
    InProgress,
    /// Advanced past the last exercise, or nothing matched the filter
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub exercise_id: String,
    pub outcome: Outcome,
    pub points_awarded: u32,
}

/// Runs a learner through the exercises of one category.
///
/// Every question is answered once and then stays revealed until
/// [`advance`](Self::advance) moves on. Out-of-order calls are ignored rather
/// than reported: the front end is expected to disable those controls.
/// Changing the category or the difficulty filter always starts a fresh run.
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    category: Option<ExerciseCategory>,
    filter: DifficultyFilter,
    // indices into category.exercises, in authored order
    filtered: Vec<usize>,
    cursor: usize,
    correct_count: usize,
    total_points: u32,
    current_streak: usize,
    best_streak: usize,
    is_complete: bool,
    review: Option<Outcome>,
    log: Vec<AnswerRecord>,
    started_at: Instant,
    finished_at: Option<Instant>,
}

impl Default for ExerciseSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseSession {
    pub fn new() -> Self {
        Self {
            category: None,
            filter: DifficultyFilter::All,
            filtered: Vec::new(),
            cursor: 0,
            correct_count: 0,
            total_points: 0,
            current_streak: 0,
            best_streak: 0,
            is_complete: false,
            review: None,
            log: Vec::new(),
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    pub fn with_category(category: ExerciseCategory) -> Self {
        let mut session = Self::new();
        session.select_category(category);
        session
    }

    /// Start a run over `category` with every difficulty included
    pub fn select_category(&mut self, category: ExerciseCategory) {
        info!(
            "starting exercises in '{}' ({} items)",
            category.id,
            category.exercises.len()
        );
        self.category = Some(category);
        self.filter = DifficultyFilter::All;
        self.restart();
    }

    /// Back to category selection, dropping all run state
    pub fn leave(&mut self) {
        *self = Self::new();
    }

    /// Restrict the run to one difficulty (or all). Always restarts, even
    /// when `filter` equals the current one.
    pub fn set_difficulty_filter(&mut self, filter: DifficultyFilter) {
        self.filter = filter;
        if self.category.is_some() {
            self.restart();
        }
    }

    /// Practice the same category and filter again from the start
    pub fn reset(&mut self) {
        if self.category.is_some() {
            self.restart();
        }
    }

    fn restart(&mut self) {
        let filter = self.filter;
        self.filtered = self
            .category
            .iter()
            .flat_map(|c| c.exercises.iter().enumerate())
            .filter(|(_, e)| filter.admits(e.difficulty))
            .map(|(idx, _)| idx)
            .collect();
        self.cursor = 0;
        self.correct_count = 0;
        self.total_points = 0;
        self.current_streak = 0;
        self.best_streak = 0;
        self.review = None;
        self.log.clear();
        self.started_at = Instant::now();
        self.finished_at = None;
        self.is_complete = false;

        if self.filtered.is_empty() {
            debug!("no exercises at difficulty '{}'", self.filter);
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.is_complete = true;
        self.finished_at = Some(Instant::now());
        debug!(
            "session complete: {}/{} correct, {} pts",
            self.correct_count,
            self.filtered.len(),
            self.total_points
        );
    }

    /// Check `response` against the current exercise and reveal it.
    ///
    /// Returns `None` when there is nothing to answer: no pending
    /// question, or the current one was already answered.
    pub fn submit_answer(&mut self, response: &Response) -> Option<Outcome> {
        if self.review.is_some() {
            return None;
        }
        let exercise = self.current()?;
        let points = exercise.points;
        let exercise_id = exercise.id.clone();

        let outcome = if validator::validate(&exercise.kind, response) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        let points_awarded = match outcome {
            Outcome::Correct => {
                self.correct_count += 1;
                self.total_points += points;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
                points
            }
            Outcome::Incorrect => {
                self.current_streak = 0;
                0
            }
        };
        debug!("exercise {exercise_id}: {outcome:?}");

        self.log.push(AnswerRecord {
            exercise_id,
            outcome,
            points_awarded,
        });
        self.review = Some(outcome);
        Some(outcome)
    }

    /// Move past a reviewed question. Returns false if nothing moved.
    pub fn advance(&mut self) -> bool {
        if self.review.is_none() || self.is_complete {
            return false;
        }
        self.review = None;
        self.cursor += 1;
        if self.cursor == self.filtered.len() {
            self.complete();
        }
        true
    }

    pub fn phase(&self) -> Phase {
        match (&self.category, self.is_complete) {
            (None, _) => Phase::Selecting,
            (Some(_), false) => Phase::InProgress,
            (Some(_), true) => Phase::Completed,
        }
    }

    pub fn category(&self) -> Option<&ExerciseCategory> {
        self.category.as_ref()
    }

    pub fn filter(&self) -> DifficultyFilter {
        self.filter
    }

    /// Exercises of the active run, in order
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> + '_ {
        let all = self
            .category
            .as_ref()
            .map(|c| c.exercises.as_slice())
            .unwrap_or_default();
        self.filtered.iter().filter_map(move |&idx| all.get(idx))
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// The exercise at the cursor, if the run is still going
    pub fn current(&self) -> Option<&Exercise> {
        if self.is_complete {
            return None;
        }
        let idx = *self.filtered.get(self.cursor)?;
        self.category.as_ref()?.exercises.get(idx)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn current_streak(&self) -> usize {
        self.current_streak
    }

    pub fn best_streak(&self) -> usize {
        self.best_streak
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Whether the current question has been answered and is on show
    pub fn is_reviewing(&self) -> bool {
        self.review.is_some()
    }

    /// Outcome of the current question while it is being reviewed
    pub fn review(&self) -> Option<Outcome> {
        self.review
    }

    /// Questions answered so far, the one under review included
    pub fn answered(&self) -> usize {
        self.cursor + usize::from(self.review.is_some())
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.log
    }

    /// Rounded share of correct answers. A question on review already
    /// counts as answered, so the denominator is `answered()`, not `cursor()`.
    pub fn accuracy_percent(&self) -> u32 {
        crate::util::accuracy_percent(self.correct_count, self.answered())
    }

    /// Time since the run started, frozen once it completes
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let end = self.finished_at.unwrap_or(now);
        end.saturating_duration_since(self.started_at)
    }

    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary::new(self.correct_count, self.answered(), self.len());
        summary.total_points = Some(self.total_points);
        summary.elapsed = Some(self.elapsed());
        summary.best_streak = Some(self.best_streak);
        summary
    }
}
