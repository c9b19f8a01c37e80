use serde::{Deserialize, Serialize};

/// Marker a fill-in-the-blank prompt uses for the missing word
pub const BLANK_MARKER: &str = "___";

/// Number of options every authored multiple-choice exercise carries
pub const CHOICE_OPTIONS: usize = 4;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Point value content is normally authored with at this level
    pub fn standard_points(&self) -> u32 {
        match self {
            Difficulty::Beginner => 10,
            Difficulty::Intermediate => 15,
            Difficulty::Advanced => 20,
        }
    }
}

/// Restricts which exercises of a category take part in a session
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DifficultyFilter {
    #[default]
    All,
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyFilter {
    pub fn admits(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Beginner => difficulty == Difficulty::Beginner,
            DifficultyFilter::Intermediate => difficulty == Difficulty::Intermediate,
            DifficultyFilter::Advanced => difficulty == Difficulty::Advanced,
        }
    }

    /// Next filter in display order, wrapping back to `All`
    pub fn cycle(&self) -> Self {
        match self {
            DifficultyFilter::All => DifficultyFilter::Beginner,
            DifficultyFilter::Beginner => DifficultyFilter::Intermediate,
            DifficultyFilter::Intermediate => DifficultyFilter::Advanced,
            DifficultyFilter::Advanced => DifficultyFilter::All,
        }
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Beginner => DifficultyFilter::Beginner,
            Difficulty::Intermediate => DifficultyFilter::Intermediate,
            Difficulty::Advanced => DifficultyFilter::Advanced,
        }
    }
}

/// Which side of a translation pair is shown. `Forward` shows `source` and
/// expects the `target` phrasing back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationDirection {
    Forward,
    Reverse,
}

/// The answer shape of one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
    FillBlank {
        prompt: String,
        answer: String,
        hint: String,
        translation: String,
    },
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        correct: usize,
        translation: String,
    },
    Translation {
        source: String,
        target: String,
        direction: TranslationDirection,
        accepted: Vec<String>,
    },
    CaseInflection {
        base_word: String,
        target_case: String,
        answer: String,
        hint: String,
    },
    VerbConjugation {
        infinitive: String,
        pronoun: String,
        tense: String,
        answer: String,
    },
}

impl ExerciseKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::FillBlank { .. } => "fill in the blank",
            ExerciseKind::MultipleChoice { .. } => "multiple choice",
            ExerciseKind::Translation { .. } => "translation",
            ExerciseKind::CaseInflection { .. } => "case inflection",
            ExerciseKind::VerbConjugation { .. } => "verb conjugation",
        }
    }

    /// True when the answer is an option index rather than typed text
    pub fn is_choice(&self) -> bool {
        matches!(self, ExerciseKind::MultipleChoice { .. })
    }

    /// The text the learner is asked about
    pub fn question(&self) -> &str {
        match self {
            ExerciseKind::FillBlank { prompt, .. } | ExerciseKind::MultipleChoice { prompt, .. } => {
                prompt
            }
            ExerciseKind::Translation {
                source,
                target,
                direction,
                ..
            } => match direction {
                TranslationDirection::Forward => source,
                TranslationDirection::Reverse => target,
            },
            ExerciseKind::CaseInflection { base_word, .. } => base_word,
            ExerciseKind::VerbConjugation { infinitive, .. } => infinitive,
        }
    }

    /// The answer shown once a question has been reviewed
    pub fn canonical_answer(&self) -> &str {
        match self {
            ExerciseKind::FillBlank { answer, .. }
            | ExerciseKind::CaseInflection { answer, .. }
            | ExerciseKind::VerbConjugation { answer, .. } => answer,
            ExerciseKind::MultipleChoice {
                options, correct, ..
            } => options.get(*correct).map(String::as_str).unwrap_or_default(),
            ExerciseKind::Translation {
                source,
                target,
                direction,
                ..
            } => match direction {
                TranslationDirection::Forward => target,
                TranslationDirection::Reverse => source,
            },
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            ExerciseKind::FillBlank { hint, .. } | ExerciseKind::CaseInflection { hint, .. } => {
                Some(hint)
            }
            _ => None,
        }
    }

    pub fn translation(&self) -> Option<&str> {
        match self {
            ExerciseKind::FillBlank { translation, .. }
            | ExerciseKind::MultipleChoice { translation, .. } => Some(translation),
            _ => None,
        }
    }
}

/// One authored exercise. Immutable once loaded; sessions only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub difficulty: Difficulty,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub kind: ExerciseKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl ExerciseCategory {
    /// Number of exercises a session with `filter` would run through
    pub fn count_matching(&self, filter: DifficultyFilter) -> usize {
        self.exercises
            .iter()
            .filter(|e| filter.admits(e.difficulty))
            .count()
    }
}

/// What the learner handed in for the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Text(String),
    Choice(usize),
}

impl Response {
    pub fn text<S: Into<String>>(s: S) -> Self {
        Response::Text(s.into())
    }

    /// A blank text response counts as "no answer yet"
    pub fn is_blank(&self) -> bool {
        match self {
            Response::Text(t) => t.trim().is_empty(),
            Response::Choice(_) => false,
        }
    }
}
