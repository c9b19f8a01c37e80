//! Answer checking for every exercise kind.
//!
//! Typed answers are compared after trimming and case folding and nothing
//! else: no stemming, no edit distance, no partial credit. Translation is the
//! only kind with several accepted phrasings.

use crate::exercise::{ExerciseKind, Response};

/// Trim and case-fold a typed answer
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// True when `response` answers `kind` correctly.
///
/// A blank response, or a response of the wrong shape (text for a
/// multiple-choice item, an index for a typed one), is simply incorrect.
pub fn validate(kind: &ExerciseKind, response: &Response) -> bool {
    if response.is_blank() {
        return false;
    }

    match (kind, response) {
        (
            ExerciseKind::FillBlank { answer, .. }
            | ExerciseKind::CaseInflection { answer, .. }
            | ExerciseKind::VerbConjugation { answer, .. },
            Response::Text(input),
        ) => normalize(input) == normalize(answer),
        (ExerciseKind::MultipleChoice { correct, .. }, Response::Choice(selected)) => {
            selected == correct
        }
        (ExerciseKind::Translation { accepted, .. }, Response::Text(input)) => {
            let input = normalize(input);
            accepted.iter().any(|a| normalize(a) == input)
        }
        _ => false,
    }
}

/// Equality check for an option picked from a generated option list,
/// under the same trimming and case folding as typed answers
pub fn same_option(selected: &str, correct: &str) -> bool {
    let selected = normalize(selected);
    !selected.is_empty() && selected == normalize(correct)
}
