//! Text helpers for the screens. Kept free of ratatui types so they can be
//! tested on their own.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::exercise::{BLANK_MARKER, DifficultyFilter, ExerciseKind};
use crate::quiz::QuizDirection;

/// Fill-in prompt with the blank swapped for `[answer]` once revealed
pub fn reveal_blank(prompt: &str, answer: &str, revealed: bool) -> String {
    if revealed {
        prompt.replacen(BLANK_MARKER, &format!("[{answer}]"), 1)
    } else {
        prompt.to_string()
    }
}

/// Share of `total` already done, clamped to `0.0..=1.0`
pub fn progress_ratio(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (done as f64 / total as f64).clamp(0.0, 1.0)
}

pub fn difficulty_label(filter: DifficultyFilter) -> &'static str {
    match filter {
        DifficultyFilter::All => "all levels",
        DifficultyFilter::Beginner => "beginner",
        DifficultyFilter::Intermediate => "intermediate",
        DifficultyFilter::Advanced => "advanced",
    }
}

pub fn direction_label(direction: QuizDirection) -> &'static str {
    match direction {
        QuizDirection::Forward => "word → translation",
        QuizDirection::Reverse => "translation → word",
    }
}

pub fn option_label(idx: usize, text: &str) -> String {
    format!("{}. {text}", idx + 1)
}

/// The instruction line shown above a question
pub fn task_line(kind: &ExerciseKind) -> String {
    match kind {
        ExerciseKind::FillBlank { .. } => "Fill in the blank".to_string(),
        ExerciseKind::MultipleChoice { .. } => "Choose the correct option".to_string(),
        ExerciseKind::Translation { .. } => "Translate".to_string(),
        ExerciseKind::CaseInflection { target_case, .. } => {
            format!("Put into the {target_case} case")
        }
        ExerciseKind::VerbConjugation { pronoun, tense, .. } => {
            format!("Conjugate for \"{pronoun}\" ({tense})")
        }
    }
}

/// Keep the end of `s` that fits in `width` columns, so the caret stays visible
pub fn tail_to_width(s: &str, width: usize) -> &str {
    if s.width() <= width {
        return s;
    }
    let mut used = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}
