use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use mashq::{
    app::{self, App, AppOptions, Mode},
    config::{Config, ConfigStore, FileConfigStore},
    content::Catalog,
    exercise::DifficultyFilter,
    quiz::QuizDirection,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
};

/// language drills and vocabulary quizzes in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice grammar exercises (cases, verbs, translation, fill-in-the-blank) and vocabulary quizzes with instant feedback, points and streaks."
)]
pub struct Cli {
    /// category id to start in directly
    #[clap(short = 'c', long)]
    category: Option<String>,

    /// only run exercises of this difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<DifficultyFilter>,

    /// run a vocabulary quiz instead of exercises
    #[clap(short = 'q', long)]
    quiz: bool,

    /// which side of the word pair the quiz shows
    #[clap(long, value_enum)]
    direction: Option<QuizDirection>,

    /// json file to use instead of the built-in content
    #[clap(long)]
    content: Option<PathBuf>,

    /// seed for reproducible quizzes
    #[clap(long)]
    seed: Option<u64>,

    /// hide hints on exercises
    #[clap(long)]
    no_hints: bool,

    /// list the available categories and exit
    #[clap(short = 'l', long)]
    list: bool,
}

impl Cli {
    /// Saved preferences with anything given on the command line on top
    fn options(&self, cfg: &Config) -> AppOptions {
        let mut options = AppOptions::from(cfg);
        if let Some(difficulty) = self.difficulty {
            options.difficulty = difficulty;
        }
        if let Some(direction) = self.direction {
            options.direction = direction;
        }
        if self.no_hints {
            options.show_hints = false;
        }
        if self.quiz {
            options.mode = Mode::Vocabulary;
        }
        options.seed = self.seed;
        options
    }

    fn catalog(&self) -> Result<Catalog, mashq::error::Error> {
        match &self.content {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(),
        }
    }
}

fn print_catalog(catalog: &Catalog) {
    println!("exercises:");
    for c in &catalog.exercises {
        println!("  {:<14} {:<28} {:>3} items", c.id, c.name, c.exercises.len());
    }
    println!("vocabulary:");
    for c in &catalog.vocabulary {
        println!("  {:<14} {:<28} {:>3} words", c.id, c.name, c.words.len());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let catalog = match cli.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e).exit();
        }
    };

    if cli.list {
        print_catalog(&catalog);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let cfg = store.load();
    let mut app = App::new(catalog, cli.options(&cfg));

    if let Some(category) = &cli.category {
        if let Err(e) = app::open_from_cli(&mut app, category, cli.quiz) {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e).exit();
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    if let Err(e) = store.save(&app.config()) {
        warn!("could not save config to {}: {e}", store.path().display());
    }
    if let Some(summary) = app.last_summary() {
        println!("{}", summary.headline());
    }

    Ok(())
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit() {
        match runner.step() {
            AppEvent::Key(key) => app.on_key(key),
            // redraw keeps the elapsed clock moving
            AppEvent::Tick | AppEvent::Resize => {}
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    info!("session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["mashq"]);

        assert_eq!(cli.category, None);
        assert_eq!(cli.difficulty, None);
        assert!(!cli.quiz);
        assert!(!cli.list);
        assert!(!cli.no_hints);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "mashq",
            "-c",
            "colors",
            "-q",
            "--direction",
            "reverse",
            "-d",
            "advanced",
            "--seed",
            "42",
            "--no-hints",
        ]);
        assert_eq!(cli.category.as_deref(), Some("colors"));
        assert!(cli.quiz);
        assert_eq!(cli.direction, Some(QuizDirection::Reverse));
        assert_eq!(cli.difficulty, Some(DifficultyFilter::Advanced));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.no_hints);
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["mashq", "-d", "expert"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cfg = Config {
            difficulty: DifficultyFilter::Beginner,
            direction: QuizDirection::Reverse,
            show_hints: true,
            last_category: None,
        };

        let options = Cli::parse_from(["mashq"]).options(&cfg);
        assert_eq!(options.difficulty, DifficultyFilter::Beginner);
        assert_eq!(options.direction, QuizDirection::Reverse);
        assert!(options.show_hints);
        assert_eq!(options.mode, Mode::Exercises);

        let options = Cli::parse_from(["mashq", "-d", "all", "--no-hints", "-q"]).options(&cfg);
        assert_eq!(options.difficulty, DifficultyFilter::All);
        assert!(!options.show_hints);
        assert_eq!(options.mode, Mode::Vocabulary);
    }

    #[test]
    fn test_cli_builtin_catalog() {
        let catalog = Cli::parse_from(["mashq"]).catalog().unwrap();
        assert!(!catalog.exercises.is_empty());
    }
}
