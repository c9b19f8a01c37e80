use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Duration;

use crate::util::{accuracy_percent, format_elapsed};

/// Result of a practice run, handed to whoever renders it.
/// `total_points` and `elapsed` are only tracked by exercise sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub correct_count: usize,
    pub total_points: Option<u32>,
    pub total_questions: usize,
    pub accuracy_percent: u32,
    pub elapsed: Option<Duration>,
    pub best_streak: Option<usize>,
    pub finished_at: DateTime<Local>,
}

impl SessionSummary {
    pub(crate) fn new(correct_count: usize, answered: usize, total_questions: usize) -> Self {
        Self {
            correct_count,
            total_points: None,
            total_questions,
            accuracy_percent: accuracy_percent(correct_count, answered),
            elapsed: None,
            best_streak: None,
            finished_at: Local::now(),
        }
    }

    pub fn elapsed_display(&self) -> Option<String> {
        self.elapsed.map(format_elapsed)
    }

    /// One-line form, e.g. `4 / 5 correct (80%)  40 pts  1:12`
    pub fn headline(&self) -> String {
        let mut line = format!(
            "{} / {} correct ({}%)",
            self.correct_count, self.total_questions, self.accuracy_percent
        );
        if let Some(points) = self.total_points {
            line.push_str(&format!("  {points} pts"));
        }
        if let Some(elapsed) = self.elapsed_display() {
            line.push_str(&format!("  {elapsed}"));
        }
        line
    }
}
