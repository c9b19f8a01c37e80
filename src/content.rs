//! Exercise and vocabulary categories the sessions draw from.
//!
//! The built-in catalog is compiled into the binary from `src/data`. A
//! catalog of the same shape can be loaded from a file instead.

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::exercise::{Exercise, ExerciseCategory, ExerciseKind, BLANK_MARKER, CHOICE_OPTIONS};
use crate::quiz::VocabularyCategory;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub exercises: Vec<ExerciseCategory>,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyCategory>,
}

impl Catalog {
    /// The catalog shipped with the application
    pub fn builtin() -> Result<Self> {
        let exercises = read_embedded("exercises.json")?.exercises;
        let vocabulary = read_embedded("vocabulary.json")?.vocabulary;
        let catalog = Catalog {
            exercises,
            vocabulary,
        };
        catalog.validate()?;
        info!(
            "loaded built-in catalog: {} exercise categories, {} vocabulary categories",
            catalog.exercises.len(),
            catalog.vocabulary.len()
        );
        Ok(catalog)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(data)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let catalog = Self::from_json(&data)?;
        info!(
            "loaded catalog from {}: {} exercise categories, {} vocabulary categories",
            path.display(),
            catalog.exercises.len(),
            catalog.vocabulary.len()
        );
        Ok(catalog)
    }

    /// Reject content the sessions cannot run correctly
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.exercises.iter().map(|c| &c.id).duplicates().next() {
            return Err(Error::DuplicateId {
                id: id.clone(),
                scope: "exercise categories".into(),
            });
        }
        if let Some(id) = self.vocabulary.iter().map(|c| &c.id).duplicates().next() {
            return Err(Error::DuplicateId {
                id: id.clone(),
                scope: "vocabulary categories".into(),
            });
        }

        for category in &self.exercises {
            if let Some(id) = category.exercises.iter().map(|e| &e.id).duplicates().next() {
                return Err(Error::DuplicateId {
                    id: id.clone(),
                    scope: format!("category {}", category.id),
                });
            }
            for exercise in &category.exercises {
                validate_exercise(&category.id, exercise)?;
            }
        }
        Ok(())
    }

    pub fn exercise_category(&self, id: &str) -> Option<&ExerciseCategory> {
        self.exercises.iter().find(|c| c.id == id)
    }

    pub fn vocabulary_category(&self, id: &str) -> Option<&VocabularyCategory> {
        self.vocabulary.iter().find(|c| c.id == id)
    }

    pub fn require_exercise_category(&self, id: &str) -> Result<&ExerciseCategory> {
        self.exercise_category(id)
            .ok_or_else(|| Error::UnknownCategory(id.to_string()))
    }

    pub fn require_vocabulary_category(&self, id: &str) -> Result<&VocabularyCategory> {
        self.vocabulary_category(id)
            .ok_or_else(|| Error::UnknownCategory(id.to_string()))
    }
}

fn read_embedded(name: &str) -> Result<Catalog> {
    let text = DATA_DIR
        .get_file(name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| Error::MissingContent(name.to_string()))?;
    Ok(serde_json::from_str(text)?)
}

fn validate_exercise(category: &str, exercise: &Exercise) -> Result<()> {
    let invalid = |reason: String| Error::InvalidContent {
        category: category.to_string(),
        exercise: exercise.id.clone(),
        reason,
    };

    if exercise.points == 0 {
        return Err(invalid("point value must be positive".into()));
    }
    if exercise.points != exercise.difficulty.standard_points() {
        warn!(
            "{category}/{}: {} points for a {} exercise",
            exercise.id, exercise.points, exercise.difficulty
        );
    }

    match &exercise.kind {
        ExerciseKind::MultipleChoice {
            options, correct, ..
        } => {
            if options.len() != CHOICE_OPTIONS {
                return Err(invalid(format!(
                    "expected {CHOICE_OPTIONS} options, found {}",
                    options.len()
                )));
            }
            if *correct >= options.len() {
                return Err(invalid(format!("correct index {correct} out of range")));
            }
        }
        ExerciseKind::Translation { accepted, .. } => {
            if accepted.iter().all(|a| a.trim().is_empty()) {
                return Err(invalid("no accepted answers".into()));
            }
        }
        ExerciseKind::FillBlank { prompt, .. } => {
            if !prompt.contains(BLANK_MARKER) {
                warn!("{category}/{}: prompt has no {BLANK_MARKER} marker", exercise.id);
            }
        }
        ExerciseKind::CaseInflection { .. } | ExerciseKind::VerbConjugation { .. } => {}
    }
    Ok(())
}
