use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};

use crate::config::Config;
use crate::content::Catalog;
use crate::error::{Error, Result};
use crate::exercise::{DifficultyFilter, ExerciseKind, Response};
use crate::quiz::{QuizDirection, QuizSession};
use crate::session::{ExerciseSession, Phase};
use crate::summary::SessionSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Exercises,
    Vocabulary,
}

impl Mode {
    pub fn toggle(&self) -> Self {
        match self {
            Mode::Exercises => Mode::Vocabulary,
            Mode::Vocabulary => Mode::Exercises,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Exercise,
    Quiz,
}

/// Startup settings, merged from the saved config and the command line
#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    pub difficulty: DifficultyFilter,
    pub direction: QuizDirection,
    pub show_hints: bool,
    pub seed: Option<u64>,
    pub mode: Mode,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            difficulty: DifficultyFilter::All,
            direction: QuizDirection::Forward,
            show_hints: true,
            seed: None,
            mode: Mode::Exercises,
        }
    }
}

impl From<&Config> for AppOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            difficulty: cfg.difficulty,
            direction: cfg.direction,
            show_hints: cfg.show_hints,
            ..Self::default()
        }
    }
}

pub struct App {
    catalog: Catalog,
    pub mode: Mode,
    pub screen: Screen,
    menu_cursor: usize,
    pub exercises: ExerciseSession,
    pub quiz: Option<QuizSession>,
    input: String,
    choice: usize,
    difficulty: DifficultyFilter,
    direction: QuizDirection,
    show_hints: bool,
    seed: Option<u64>,
    last_category: Option<String>,
    last_summary: Option<SessionSummary>,
    should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog, options: AppOptions) -> Self {
        Self {
            catalog,
            mode: options.mode,
            screen: Screen::Menu,
            menu_cursor: 0,
            exercises: ExerciseSession::new(),
            quiz: None,
            input: String::new(),
            choice: 0,
            difficulty: options.difficulty,
            direction: options.direction,
            show_hints: options.show_hints,
            seed: options.seed,
            last_category: None,
            last_summary: None,
            should_quit: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    /// Number of entries on the menu for the current mode
    pub fn menu_len(&self) -> usize {
        match self.mode {
            Mode::Exercises => self.catalog.exercises.len(),
            Mode::Vocabulary => self.catalog.vocabulary.len(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn choice(&self) -> usize {
        self.choice
    }

    pub fn difficulty(&self) -> DifficultyFilter {
        self.difficulty
    }

    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Open the exercise category `id` directly, skipping the menu
    pub fn open_exercises(&mut self, id: &str) -> Result<()> {
        let category = self.catalog.require_exercise_category(id)?.clone();
        self.mode = Mode::Exercises;
        if let Some(pos) = self.catalog.exercises.iter().position(|c| c.id == id) {
            self.menu_cursor = pos;
        }
        self.exercises.select_category(category);
        if self.difficulty != DifficultyFilter::All {
            self.exercises.set_difficulty_filter(self.difficulty);
        }
        self.clear_input();
        self.last_category = Some(id.to_string());
        self.screen = Screen::Exercise;
        Ok(())
    }

    /// Start a vocabulary quiz over category `id`
    pub fn open_quiz(&mut self, id: &str) -> Result<()> {
        let category = self.catalog.require_vocabulary_category(id)?.clone();
        self.mode = Mode::Vocabulary;
        if let Some(pos) = self.catalog.vocabulary.iter().position(|c| c.id == id) {
            self.menu_cursor = pos;
        }
        self.quiz = Some(match self.seed {
            Some(seed) => QuizSession::with_seed(category, self.direction, seed),
            None => QuizSession::new(category, self.direction),
        });
        self.clear_input();
        self.last_category = Some(id.to_string());
        self.screen = Screen::Quiz;
        Ok(())
    }

    /// Open whatever the menu cursor points at
    fn open_selected(&mut self) -> Result<()> {
        let id = match self.mode {
            Mode::Exercises => self.catalog.exercises.get(self.menu_cursor).map(|c| c.id.clone()),
            Mode::Vocabulary => self
                .catalog
                .vocabulary
                .get(self.menu_cursor)
                .map(|c| c.id.clone()),
        };
        let Some(id) = id else {
            return Ok(());
        };
        match self.mode {
            Mode::Exercises => self.open_exercises(&id),
            Mode::Vocabulary => self.open_quiz(&id),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        match self.screen {
            Screen::Menu => self.on_menu_key(key),
            Screen::Exercise => self.on_exercise_key(key),
            Screen::Quiz => self.on_quiz_key(key),
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_cursor + 1 < self.menu_len() {
                    self.menu_cursor += 1;
                }
            }
            KeyCode::Tab => {
                self.mode = self.mode.toggle();
                self.menu_cursor = 0;
            }
            KeyCode::Enter => {
                // ids on the menu always come from the catalog
                if let Err(e) = self.open_selected() {
                    debug!("menu selection failed: {e}");
                }
            }
            _ => {}
        }
    }

    fn on_exercise_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.leave_exercises();
                return;
            }
            KeyCode::Tab => {
                self.difficulty = self.exercises.filter().cycle();
                self.exercises.set_difficulty_filter(self.difficulty);
                self.clear_input();
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.exercises.reset();
                self.clear_input();
                return;
            }
            _ => {}
        }

        match self.exercises.phase() {
            Phase::Selecting => self.screen = Screen::Menu,
            Phase::Completed => match key.code {
                KeyCode::Char('r') => {
                    self.exercises.reset();
                    self.clear_input();
                }
                KeyCode::Enter => self.leave_exercises(),
                _ => {}
            },
            Phase::InProgress if self.exercises.is_reviewing() => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Right) {
                    self.exercises.advance();
                    self.clear_input();
                }
            }
            Phase::InProgress => {
                if self.current_is_choice() {
                    self.on_choice_key(key);
                } else {
                    self.on_text_key(key);
                }
            }
        }
    }

    fn on_text_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(c)
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                let response = Response::text(self.input.clone());
                if !response.is_blank() {
                    self.exercises.submit_answer(&response);
                }
            }
            _ => {}
        }
    }

    fn on_choice_key(&mut self, key: KeyEvent) {
        let count = self.choice_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.choice = self.choice.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.choice + 1 < count {
                    self.choice += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if idx < count {
                    self.choice = idx;
                    self.exercises.submit_answer(&Response::Choice(idx));
                }
            }
            KeyCode::Enter => {
                self.exercises.submit_answer(&Response::Choice(self.choice));
            }
            _ => {}
        }
    }

    fn on_quiz_key(&mut self, key: KeyEvent) {
        let Some(quiz) = self.quiz.as_mut() else {
            self.screen = Screen::Menu;
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.leave_quiz();
                return;
            }
            KeyCode::Tab => {
                self.direction = quiz.direction().toggle();
                quiz.set_direction(self.direction);
                self.choice = 0;
                return;
            }
            KeyCode::Char('r') if ctrl => {
                quiz.restart();
                self.choice = 0;
                return;
            }
            _ => {}
        }

        if quiz.is_complete() {
            match key.code {
                KeyCode::Char('r') => {
                    quiz.restart();
                    self.choice = 0;
                }
                KeyCode::Enter => self.leave_quiz(),
                _ => {}
            }
            return;
        }

        if quiz.is_answered() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Right) {
                quiz.next();
                self.choice = 0;
            }
            return;
        }

        let count = quiz.current().map(|q| q.options.len()).unwrap_or_default();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.choice = self.choice.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.choice + 1 < count {
                    self.choice += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if idx < count {
                    self.choice = idx;
                    quiz.answer_index(idx);
                }
            }
            KeyCode::Enter => {
                quiz.answer_index(self.choice);
            }
            _ => {}
        }
    }

    fn current_is_choice(&self) -> bool {
        self.exercises
            .current()
            .map(|e| e.kind.is_choice())
            .unwrap_or(false)
    }

    fn choice_count(&self) -> usize {
        match self.exercises.current().map(|e| &e.kind) {
            Some(ExerciseKind::MultipleChoice { options, .. }) => options.len(),
            _ => 0,
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.choice = 0;
    }

    fn leave_exercises(&mut self) {
        if self.exercises.answered() > 0 {
            self.last_summary = Some(self.exercises.summary());
        }
        self.exercises.leave();
        self.clear_input();
        self.screen = Screen::Menu;
    }

    fn leave_quiz(&mut self) {
        if let Some(quiz) = self.quiz.take() {
            if quiz.cursor() > 0 || quiz.is_answered() {
                self.last_summary = Some(quiz.summary());
            }
        }
        self.clear_input();
        self.screen = Screen::Menu;
    }

    fn quit(&mut self) {
        match self.screen {
            Screen::Exercise => self.leave_exercises(),
            Screen::Quiz => self.leave_quiz(),
            Screen::Menu => {}
        }
        info!("quitting");
        self.should_quit = true;
    }

    /// Summary of the most recent run that had at least one answer
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    /// Preferences to persist for the next launch
    pub fn config(&self) -> Config {
        Config {
            difficulty: self.difficulty,
            direction: self.direction,
            show_hints: self.show_hints,
            last_category: self.last_category.clone(),
        }
    }
}

/// Map an unknown `--category` to the error the command line reports
pub fn open_from_cli(app: &mut App, category: &str, quiz: bool) -> Result<()> {
    let opened = if quiz {
        app.open_quiz(category)
    } else {
        app.open_exercises(category)
    };
    match opened {
        Err(Error::UnknownCategory(id)) => Err(Error::UnknownCategory(format!(
            "{id} (run with --list to see available categories)"
        ))),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Outcome;
    use assert_matches::assert_matches;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        let options = AppOptions {
            seed: Some(7),
            ..AppOptions::default()
        };
        App::new(Catalog::builtin().unwrap(), options)
    }

    #[test]
    fn test_menu_navigation_and_quit() {
        let mut app = app();
        assert_eq!(app.screen, Screen::Menu);
        app.on_key(key(KeyCode::Up));
        assert_eq!(app.menu_cursor(), 0);
        for _ in 0..20 {
            app.on_key(key(KeyCode::Down));
        }
        assert_eq!(app.menu_cursor(), app.menu_len() - 1);

        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.mode, Mode::Vocabulary);
        assert_eq!(app.menu_cursor(), 0);

        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_enter_opens_exercise_category() {
        let mut app = app();
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Exercise);
        assert_eq!(app.exercises.phase(), Phase::InProgress);
        assert_eq!(
            app.exercises.category().map(|c| c.id.as_str()),
            Some(app.catalog().exercises[0].id.as_str())
        );
    }

    #[test]
    fn test_typed_answer_submit_and_advance() {
        let mut app = app();
        app.open_exercises("verbs").unwrap();
        let answer = app
            .exercises
            .current()
            .unwrap()
            .kind
            .canonical_answer()
            .to_string();

        // blank input is not an answer
        app.on_key(key(KeyCode::Enter));
        assert!(!app.exercises.is_reviewing());

        type_str(&mut app, &format!("  {}  ", answer.to_uppercase()));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.exercises.review(), Some(Outcome::Correct));

        // typing during review is ignored
        type_str(&mut app, "x");
        assert_eq!(app.exercises.cursor(), 0);

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.exercises.cursor(), 1);
        assert!(app.input().is_empty());
    }

    #[test]
    fn test_modifier_chords_do_not_type() {
        let mut app = app();
        app.open_exercises("verbs").unwrap();
        type_str(&mut app, "ab");
        app.on_key(ctrl('w'));
        app.on_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(app.input(), "ab");

        app.on_key(KeyEvent::new(KeyCode::Char('Ж'), KeyModifiers::SHIFT));
        assert_eq!(app.input(), "abЖ");
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut app = app();
        app.open_exercises("verbs").unwrap();
        type_str(&mut app, "abc");
        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.input(), "ab");
    }

    #[test]
    fn test_tab_cycles_difficulty_and_restarts() {
        let mut app = app();
        app.open_exercises("cases").unwrap();
        type_str(&mut app, "foo");
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.exercises.filter(), DifficultyFilter::Beginner);
        assert_eq!(app.difficulty(), DifficultyFilter::Beginner);
        assert_eq!(app.exercises.cursor(), 0);
        assert!(app.input().is_empty());
        assert_eq!(app.config().difficulty, DifficultyFilter::Beginner);
    }

    #[test]
    fn test_preferred_difficulty_applies_on_open() {
        let options = AppOptions {
            difficulty: DifficultyFilter::Advanced,
            ..AppOptions::default()
        };
        let mut app = App::new(Catalog::builtin().unwrap(), options);
        app.open_exercises("cases").unwrap();
        assert_eq!(app.exercises.filter(), DifficultyFilter::Advanced);
        assert_eq!(app.exercises.len(), 5);
    }

    #[test]
    fn test_ctrl_r_resets_run() {
        let mut app = app();
        app.open_exercises("verbs").unwrap();
        type_str(&mut app, "zzz");
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.exercises.cursor(), 1);

        app.on_key(ctrl('r'));
        assert_eq!(app.exercises.cursor(), 0);
        assert_eq!(app.exercises.correct_count(), 0);
    }

    #[test]
    fn test_esc_leaves_and_keeps_summary() {
        let mut app = app();
        app.open_exercises("verbs").unwrap();
        type_str(&mut app, "zzz");
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Esc));

        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(app.exercises.phase(), Phase::Selecting);
        let summary = app.last_summary().unwrap();
        assert_eq!(summary.correct_count, 0);
        assert_eq!(summary.total_questions, 15);
        assert_eq!(app.config().last_category.as_deref(), Some("verbs"));
    }

    #[test]
    fn test_multiple_choice_by_number() {
        let mut app = app();
        app.open_exercises("academic").unwrap();
        while !app.exercises.current().unwrap().kind.is_choice() {
            type_str(&mut app, "zzz");
            app.on_key(key(KeyCode::Enter));
            app.on_key(key(KeyCode::Enter));
        }
        let correct = match &app.exercises.current().unwrap().kind {
            ExerciseKind::MultipleChoice { correct, .. } => *correct,
            _ => unreachable!(),
        };
        let digit = char::from_digit(correct as u32 + 1, 10).unwrap();
        app.on_key(key(KeyCode::Char(digit)));
        assert_eq!(app.exercises.review(), Some(Outcome::Correct));
        assert_eq!(app.choice(), correct);
    }

    #[test]
    fn test_finishing_run_then_restart() {
        let mut app = app();
        app.open_exercises("sentences").unwrap();
        let total = app.exercises.len();
        for _ in 0..total {
            if app.current_is_choice() {
                app.on_key(key(KeyCode::Enter));
            } else {
                type_str(&mut app, "zzz");
                app.on_key(key(KeyCode::Enter));
            }
            app.on_key(key(KeyCode::Enter));
        }
        assert_eq!(app.exercises.phase(), Phase::Completed);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.exercises.phase(), Phase::InProgress);
        assert_eq!(app.exercises.cursor(), 0);
    }

    #[test]
    fn test_quiz_flow_and_direction_toggle() {
        let mut app = app();
        app.open_quiz("colors").unwrap();
        assert_eq!(app.screen, Screen::Quiz);

        let quiz = app.quiz.as_ref().unwrap();
        let correct = quiz.current().unwrap().correct_answer.clone();
        let idx = quiz
            .current()
            .unwrap()
            .options
            .iter()
            .position(|o| *o == correct)
            .unwrap();
        for _ in 0..idx {
            app.on_key(key(KeyCode::Down));
        }
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.quiz.as_ref().unwrap().score(), 1);

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.quiz.as_ref().unwrap().cursor(), 1);

        app.on_key(key(KeyCode::Tab));
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.direction(), QuizDirection::Reverse);
        assert_eq!(quiz.cursor(), 0);
        assert_eq!(quiz.score(), 0);
        assert_eq!(app.config().direction, QuizDirection::Reverse);
    }

    #[test]
    fn test_quiz_esc_returns_to_menu() {
        let mut app = app();
        app.open_quiz("days").unwrap();
        app.on_key(key(KeyCode::Char('1')));
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.quiz.is_none());
        assert_eq!(app.last_summary().unwrap().total_questions, 7);
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.open_exercises("cases").unwrap();
        app.on_key(ctrl('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_unknown_category_from_cli() {
        let mut app = app();
        assert_matches!(
            open_from_cli(&mut app, "poetry", false),
            Err(Error::UnknownCategory(msg)) if msg.starts_with("poetry")
        );
        assert_matches!(
            open_from_cli(&mut app, "cases", true),
            Err(Error::UnknownCategory(_))
        );
        assert!(open_from_cli(&mut app, "food", true).is_ok());
        assert_eq!(app.screen, Screen::Quiz);
    }
}
