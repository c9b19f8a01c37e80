use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::sampler::{build_options, DEFAULT_DISTRACTORS};
use crate::session::Outcome;
use crate::summary::SessionSummary;
use crate::validator;

/// Most questions a single quiz run asks
pub const QUIZ_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub words: Vec<WordPair>,
}

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
pub enum QuizDirection {
    /// Show the source word, pick its translation
    #[default]
    Forward,
    /// Show the translation, pick the source word
    Reverse,
}

impl QuizDirection {
    pub fn toggle(&self) -> Self {
        match self {
            QuizDirection::Forward => QuizDirection::Reverse,
            QuizDirection::Reverse => QuizDirection::Forward,
        }
    }

    pub fn prompt<'a>(&self, word: &'a WordPair) -> &'a str {
        match self {
            QuizDirection::Forward => &word.source,
            QuizDirection::Reverse => &word.target,
        }
    }

    pub fn answer<'a>(&self, word: &'a WordPair) -> &'a str {
        match self {
            QuizDirection::Forward => &word.target,
            QuizDirection::Reverse => &word.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub word: WordPair,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    TryAgain,
}

impl Grade {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            80..=u32::MAX => Grade::Excellent,
            50..=79 => Grade::Good,
            _ => Grade::TryAgain,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent!",
            Grade::Good => "Good result!",
            Grade::TryAgain => "Try again!",
        }
    }
}

/// Multiple-choice drill over a random sample of one vocabulary category.
///
/// The question list is generated whole and never edited: switching the
/// direction or restarting draws a new sample. Each question takes exactly
/// one answer.
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: VocabularyCategory,
    direction: QuizDirection,
    questions: Vec<QuizQuestion>,
    cursor: usize,
    score: usize,
    selected: Option<String>,
    outcome: Option<Outcome>,
    is_complete: bool,
    rng: StdRng,
}

impl QuizSession {
    pub fn new(category: VocabularyCategory, direction: QuizDirection) -> Self {
        Self::with_rng(category, direction, StdRng::from_entropy())
    }

    pub fn with_seed(category: VocabularyCategory, direction: QuizDirection, seed: u64) -> Self {
        Self::with_rng(category, direction, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(category: VocabularyCategory, direction: QuizDirection, rng: StdRng) -> Self {
        let mut quiz = Self {
            category,
            direction,
            questions: Vec::new(),
            cursor: 0,
            score: 0,
            selected: None,
            outcome: None,
            is_complete: false,
            rng,
        };
        quiz.generate();
        quiz
    }

    /// Draw a fresh sample of questions and zero the score
    fn generate(&mut self) {
        let direction = self.direction;
        let words = self.category.words.as_slice();
        let rng = &mut self.rng;

        // choose_multiple does not randomise order on its own
        let mut picked: Vec<&WordPair> = words.choose_multiple(rng, QUIZ_LENGTH).collect();
        picked.shuffle(rng);

        self.questions = picked
            .into_iter()
            .map(|word| QuizQuestion {
                word: word.clone(),
                prompt: direction.prompt(word).to_string(),
                options: build_options(
                    word,
                    words,
                    DEFAULT_DISTRACTORS,
                    |w: &WordPair| w.source.clone(),
                    |w: &WordPair| direction.answer(w).to_string(),
                    rng,
                ),
                correct_answer: direction.answer(word).to_string(),
            })
            .collect();

        self.cursor = 0;
        self.score = 0;
        self.selected = None;
        self.outcome = None;
        self.is_complete = self.questions.is_empty();
        info!(
            "quiz over '{}' ({}): {} questions",
            self.category.id,
            self.direction,
            self.questions.len()
        );
    }

    /// New random sample over the same category and direction
    pub fn restart(&mut self) {
        self.generate();
    }

    /// Switch direction; the old question set is discarded
    pub fn set_direction(&mut self, direction: QuizDirection) {
        self.direction = direction;
        self.generate();
    }

    pub fn set_category(&mut self, category: VocabularyCategory) {
        self.category = category;
        self.generate();
    }

    /// Record `selected` as the answer to the current question.
    /// Returns `None` if the question was already answered or the quiz is over.
    pub fn answer(&mut self, selected: &str) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }
        let question = self.current()?;
        let outcome = if validator::same_option(selected, &question.correct_answer) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        if outcome == Outcome::Correct {
            self.score += 1;
        }
        debug!("quiz question {}: {outcome:?}", self.cursor + 1);
        self.selected = Some(selected.to_string());
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Answer with the option at `index` of the current question
    pub fn answer_index(&mut self, index: usize) -> Option<Outcome> {
        let option = self.current()?.options.get(index)?.clone();
        self.answer(&option)
    }

    /// Move to the next question once the current one is answered
    pub fn next(&mut self) -> bool {
        if self.outcome.is_none() || self.is_complete {
            return false;
        }
        self.selected = None;
        self.outcome = None;
        self.cursor += 1;
        if self.cursor == self.questions.len() {
            self.is_complete = true;
            debug!("quiz complete: {}/{}", self.score, self.questions.len());
        }
        true
    }

    pub fn category(&self) -> &VocabularyCategory {
        &self.category
    }

    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.is_complete {
            return None;
        }
        self.questions.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// The option picked for the current question, once answered
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_answered(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn summary(&self) -> SessionSummary {
        let answered = self.cursor + usize::from(self.outcome.is_some());
        SessionSummary::new(self.score, answered, self.questions.len())
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percent(self.summary().accuracy_percent)
    }
}
