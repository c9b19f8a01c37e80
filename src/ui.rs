pub mod labels;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Widget, Wrap},
};

use crate::app::{App, Mode, Screen};
use crate::exercise::{Exercise, ExerciseKind};
use crate::quiz::{QuizDirection, QuizSession};
use crate::session::{ExerciseSession, Outcome, Phase};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Correct => bold().fg(Color::Green),
        Outcome::Incorrect => bold().fg(Color::Red),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(3),    // body
                Constraint::Length(1), // legend
            ])
            .split(area);

        match self.screen {
            Screen::Menu => render_menu(self, chunks[0], chunks[1], buf),
            Screen::Exercise => render_exercise(self, chunks[0], chunks[1], buf),
            Screen::Quiz => match &self.quiz {
                Some(quiz) => render_quiz(self, quiz, chunks[0], chunks[1], buf),
                None => render_menu(self, chunks[0], chunks[1], buf),
            },
        }

        Paragraph::new(Span::styled(legend(self), dim().add_modifier(Modifier::ITALIC)))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

fn legend(app: &App) -> &'static str {
    match app.screen {
        Screen::Menu => "(↑↓) move  (tab) exercises/vocabulary  (enter) start  (esc) quit",
        Screen::Exercise => match app.exercises.phase() {
            Phase::Completed => "(r)etry  (tab) difficulty  (enter/esc) menu",
            _ if app.exercises.is_reviewing() => "(enter) next  (tab) difficulty  (esc) menu",
            _ => "(enter) answer  (tab) difficulty  (ctrl-r) reset  (esc) menu",
        },
        Screen::Quiz => match &app.quiz {
            Some(q) if q.is_complete() => "(r)etry  (tab) direction  (enter/esc) menu",
            Some(q) if q.is_answered() => "(enter) next  (tab) direction  (esc) menu",
            _ => "(1-4/enter) answer  (tab) direction  (ctrl-r) restart  (esc) menu",
        },
    }
}

fn render_menu(app: &App, header: Rect, body: Rect, buf: &mut Buffer) {
    let selected = match app.mode {
        Mode::Exercises => 0,
        Mode::Vocabulary => 1,
    };
    Tabs::new(vec!["Exercises", "Vocabulary"])
        .select(selected)
        .highlight_style(bold().fg(Color::Yellow))
        .render(header, buf);

    let catalog = app.catalog();
    let mut lines: Vec<Line> = match app.mode {
        Mode::Exercises => catalog
            .exercises
            .iter()
            .map(|c| {
                (
                    c.name.clone(),
                    format!("{} exercises", c.count_matching(app.difficulty())),
                )
            })
            .collect::<Vec<_>>(),
        Mode::Vocabulary => catalog
            .vocabulary
            .iter()
            .map(|c| (c.name.clone(), format!("{} words", c.words.len())))
            .collect::<Vec<_>>(),
    }
    .into_iter()
    .enumerate()
    .map(|(idx, (name, count))| {
        let (marker, style) = if idx == app.menu_cursor() {
            ("› ", bold().fg(Color::Yellow))
        } else {
            ("  ", Style::default())
        };
        Line::from(vec![
            Span::styled(format!("{marker}{name}"), style),
            Span::styled(format!("  {count}"), dim()),
        ])
    })
    .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("Nothing to practice here.", dim())));
    }

    if app.mode == Mode::Exercises {
        if let Some(category) = catalog.exercises.get(app.menu_cursor()) {
            lines.push(Line::default());
            if let Some(subtitle) = &category.subtitle {
                lines.push(Line::from(Span::styled(subtitle.clone(), bold())));
            }
            if let Some(description) = &category.description {
                lines.push(Line::from(Span::styled(
                    description.clone(),
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("difficulty: {}", labels::difficulty_label(app.difficulty())),
                dim(),
            )));
        }
    } else {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("direction: {}", labels::direction_label(app.direction())),
            dim(),
        )));
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" mashq "))
        .wrap(Wrap { trim: false })
        .render(body, buf);
}

fn render_exercise(app: &App, header: Rect, body: Rect, buf: &mut Buffer) {
    let session = &app.exercises;
    let Some(category) = session.category() else {
        return;
    };

    Paragraph::new(Line::from(vec![
        Span::styled(category.name.clone(), bold()),
        Span::styled(
            format!("  {}", labels::difficulty_label(session.filter())),
            dim(),
        ),
    ]))
    .render(header, buf);

    if session.phase() == Phase::Completed {
        render_exercise_results(session, body, buf);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // progress
            Constraint::Length(1), // counters
            Constraint::Min(3),    // question
        ])
        .split(body);

    Gauge::default()
        .ratio(labels::progress_ratio(session.cursor(), session.len()))
        .label(format!("{} / {}", session.cursor() + 1, session.len()))
        .gauge_style(Style::default().fg(Color::Cyan))
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "✓ {}   {} pts   streak {}   {}",
            session.correct_count(),
            session.total_points(),
            session.current_streak(),
            crate::util::format_elapsed(session.elapsed())
        ),
        dim(),
    ))
    .alignment(Alignment::Right)
    .render(chunks[1], buf);

    if let Some(exercise) = session.current() {
        let inner_width = chunks[2].width.saturating_sub(4) as usize;
        let lines = question_lines(app, exercise, inner_width);
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} · {} pts ", exercise.kind.name(), exercise.points)),
            )
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);
    }
}

fn question_lines(app: &App, exercise: &Exercise, width: usize) -> Vec<Line<'static>> {
    let session = &app.exercises;
    let review = session.review();
    let revealed = review.is_some();
    let kind = &exercise.kind;

    let mut lines = vec![
        Line::from(Span::styled(labels::task_line(kind), dim())),
        Line::default(),
    ];

    let question = match kind {
        ExerciseKind::FillBlank { prompt, answer, .. } => {
            labels::reveal_blank(prompt, answer, revealed)
        }
        other => other.question().to_string(),
    };
    lines.push(Line::from(Span::styled(question, bold())));

    if app.show_hints() && !revealed {
        if let Some(hint) = kind.hint() {
            lines.push(Line::from(Span::styled(
                format!("hint: {hint}"),
                Style::default().fg(Color::Blue),
            )));
        }
    }
    lines.push(Line::default());

    if let ExerciseKind::MultipleChoice {
        options, correct, ..
    } = kind
    {
        for (idx, option) in options.iter().enumerate() {
            let style = match review {
                Some(_) if idx == *correct => outcome_style(Outcome::Correct),
                Some(Outcome::Incorrect) if idx == app.choice() => {
                    outcome_style(Outcome::Incorrect)
                }
                None if idx == app.choice() => bold().fg(Color::Yellow),
                _ => Style::default(),
            };
            let marker = if idx == app.choice() { "› " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", labels::option_label(idx, option)),
                style,
            )));
        }
    } else {
        let shown = labels::tail_to_width(app.input(), width.saturating_sub(3));
        let mut input = vec![
            Span::styled("> ", dim()),
            Span::styled(shown.to_string(), bold()),
        ];
        if !revealed {
            input.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::UNDERLINED),
            ));
        }
        lines.push(Line::from(input));
    }

    if let Some(outcome) = review {
        lines.push(Line::default());
        let verdict = match outcome {
            Outcome::Correct => "Correct!".to_string(),
            Outcome::Incorrect => format!("Incorrect. Answer: {}", kind.canonical_answer()),
        };
        lines.push(Line::from(Span::styled(verdict, outcome_style(outcome))));
        if let Some(translation) = kind.translation().filter(|t| !t.is_empty()) {
            lines.push(Line::from(Span::styled(
                translation.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        if let Some(explanation) = &exercise.explanation {
            lines.push(Line::from(Span::styled(explanation.clone(), dim())));
        }
    }

    lines
}

fn render_exercise_results(session: &ExerciseSession, body: Rect, buf: &mut Buffer) {
    let mut lines = Vec::new();
    if session.is_empty() {
        lines.push(Line::from(Span::styled(
            "No exercises at this difficulty.",
            bold().fg(Color::Yellow),
        )));
    } else {
        let summary = session.summary();
        lines.push(Line::from(Span::styled(summary.headline(), bold())));
        lines.push(Line::from(Span::styled(
            format!("best streak {}", session.best_streak()),
            dim(),
        )));
        lines.push(Line::default());
        for (record, exercise) in session.answer_log().iter().zip(session.exercises()) {
            let mark = match record.outcome {
                Outcome::Correct => "✓",
                Outcome::Incorrect => "✗",
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{mark} "), outcome_style(record.outcome)),
                Span::raw(exercise.kind.question().to_string()),
                Span::styled(format!("  +{}", record.points_awarded), dim()),
            ]));
        }
    }
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" results "))
        .wrap(Wrap { trim: false })
        .render(body, buf);
}

fn render_quiz(app: &App, quiz: &QuizSession, header: Rect, body: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(vec![
        Span::styled(quiz.category().name.clone(), bold()),
        Span::styled(
            format!("  {}", labels::direction_label(quiz.direction())),
            dim(),
        ),
        Span::styled(format!("   score {}", quiz.score()), dim()),
    ]))
    .render(header, buf);

    if quiz.is_complete() {
        let summary = quiz.summary();
        let grade = quiz.grade();
        let lines = vec![
            Line::from(Span::styled(summary.headline(), bold())),
            Line::default(),
            Line::from(Span::styled(grade.message(), bold().fg(Color::Yellow))),
        ];
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" results "))
            .alignment(Alignment::Center)
            .render(body, buf);
        return;
    }

    let Some(question) = quiz.current() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(body);

    Gauge::default()
        .ratio(labels::progress_ratio(quiz.cursor(), quiz.len()))
        .label(format!("{} / {}", quiz.cursor() + 1, quiz.len()))
        .gauge_style(Style::default().fg(Color::Magenta))
        .render(chunks[0], buf);

    let mut lines = vec![Line::from(Span::styled(question.prompt.clone(), bold()))];
    if quiz.direction() == QuizDirection::Forward {
        if let Some(pronunciation) = &question.word.pronunciation {
            lines.push(Line::from(Span::styled(format!("[{pronunciation}]"), dim())));
        }
    }
    lines.push(Line::default());

    let outcome = quiz.outcome();
    for (idx, option) in question.options.iter().enumerate() {
        let is_correct = *option == question.correct_answer;
        let is_selected = quiz.selected() == Some(option.as_str());
        let style = match outcome {
            Some(_) if is_correct => outcome_style(Outcome::Correct),
            Some(_) if is_selected => outcome_style(Outcome::Incorrect),
            None if idx == app.choice() => bold().fg(Color::Yellow),
            _ => Style::default(),
        };
        let marker = if outcome.is_none() && idx == app.choice() {
            "› "
        } else {
            "  "
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", labels::option_label(idx, option)),
            style,
        )));
    }

    if let Some(outcome) = outcome {
        lines.push(Line::default());
        let verdict = match outcome {
            Outcome::Correct => "Correct!".to_string(),
            Outcome::Incorrect => format!("Answer: {}", question.correct_answer),
        };
        lines.push(Line::from(Span::styled(verdict, outcome_style(outcome))));
        if let Some(example) = &question.word.example {
            lines.push(Line::from(Span::styled(
                example.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .render(chunks[1], buf);
}
