//! `tutor quiz`: the practice quiz in a terminal.
//!
//! ```text
//!   stdin line ──► parse_quiz_input ──► react ──► Reaction
//!                                                  ├─ Show(text)        print
//!                                                  ├─ Scheduled{..}     print + spawn timer
//!                                                  └─ Quit
//!   timer fires ──► session.advance(gen) ──► render_screen
//! ```
//!
//! The timer runs as its own task and reports back over a channel, so the
//! input loop never blocks on it. Leaving the loop disposes the session,
//! which turns any timer still in flight into a no-op.

use std::io;

use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::core::quiz::{QuizSummary, ScoreBand};
use crate::core::{QuestionSource, QuizPhase, QuizSession, ScheduledAdvance};

const PROGRESS_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    /// Zero-based option index.
    Answer(usize),
    Restart,
    Quit,
    Help,
    Invalid(String),
}

/// Reads a line as a command. Options are accepted as numbers from `1` or
/// letters from `a`.
///
/// A letter within `option_count` is always an answer, so the one-letter
/// shortcuts `h`, `q` and `r` only apply when they aren't an option.
pub fn parse_quiz_input(line: &str, option_count: usize) -> QuizInput {
    let input = line.trim().to_lowercase();

    let mut chars = input.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some((c as u8 - b'a') as usize),
        _ => None,
    };
    if let Some(index) = letter
        && index < option_count
    {
        return QuizInput::Answer(index);
    }

    if let Ok(n) = input.parse::<usize>()
        && n >= 1
    {
        return QuizInput::Answer(n - 1);
    }

    match input.as_str() {
        "q" | "quit" | "exit" => return QuizInput::Quit,
        "r" | "restart" => return QuizInput::Restart,
        "h" | "help" | "?" => return QuizInput::Help,
        _ => {}
    }

    match letter {
        Some(index) => QuizInput::Answer(index),
        None => QuizInput::Invalid(line.trim().to_string()),
    }
}

/// What the run loop should do after an input.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    Show(String),
    Scheduled {
        output: String,
        advance: ScheduledAdvance,
    },
    Quit,
}

pub fn react(session: &mut QuizSession, input: QuizInput) -> Reaction {
    match input {
        QuizInput::Quit => Reaction::Quit,
        QuizInput::Help => Reaction::Show(HELP.to_string()),
        QuizInput::Invalid(text) => {
            Reaction::Show(format!("Didn't understand \"{}\". Type h for help.", text))
        }
        QuizInput::Answer(selection) => match session.submit_answer(selection) {
            Ok(advance) => Reaction::Scheduled {
                output: render_feedback(session),
                advance,
            },
            Err(e) => Reaction::Show(format!("  {}", e)),
        },
        QuizInput::Restart => match session.restart() {
            Ok(()) => Reaction::Show(render_screen(session)),
            Err(e) => Reaction::Show(format!("  {}", e)),
        },
    }
}

const HELP: &str = "\
Answer with the option letter or number (a / 1).
  r  restart once the quiz is complete (or type restart)
  q  quit (or type quit)";

// ============================================================================
// Rendering
// ============================================================================

/// The full screen for the session's current phase.
pub fn render_screen(session: &QuizSession) -> String {
    match session.phase() {
        QuizPhase::Loading => "Loading practice questions...".to_string(),
        QuizPhase::Empty => format!(
            "No practice questions available for unit {}.",
            session.unit_id()
        ),
        QuizPhase::InProgress | QuizPhase::Answered => render_question(session),
        QuizPhase::Completed => session
            .summary()
            .map(|s| render_summary(&s))
            .unwrap_or_default(),
    }
}

pub fn render_question(session: &QuizSession) -> String {
    let Some(question) = session.current_question() else {
        return String::new();
    };
    let state = session.state();

    let mut out = format!(
        "Question {} of {}  {}\n\n{}\n\n",
        state.current_index + 1,
        session.total(),
        progress_bar(session.progress_percent()),
        question.text
    );
    for (i, option) in question.options.iter().enumerate() {
        let marker = if state.selected_answer == Some(i) { '>' } else { ' ' };
        out.push_str(&format!("{} {}) {}\n", marker, option_label(i), option));
    }
    out
}

pub fn render_feedback(session: &QuizSession) -> String {
    let Some(feedback) = &session.state().feedback else {
        return String::new();
    };
    let mark = if feedback.is_correct { "✓" } else { "✗" };
    let mut out = format!("{} {}", mark, feedback.message);
    if let Some(explanation) = session.current_question().and_then(|q| q.explanation.as_deref()) {
        out.push('\n');
        out.push_str(&super::wrap_indented(explanation, "  "));
    }
    out
}

pub fn render_summary(summary: &QuizSummary) -> String {
    let band = match summary.band {
        ScoreBand::Green => "",
        ScoreBand::Yellow => " (almost there)",
        ScoreBand::Red => " (needs review)",
    };
    format!(
        "Practice Complete!\n\nYou scored {} out of {} ({}%){}\n{}\n\nType r to try again or q to quit.",
        summary.score, summary.total, summary.percentage, band, summary.message
    )
}

fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| (b'A' + i) as char)
        .unwrap_or('?')
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

// ============================================================================
// Run loop
// ============================================================================

/// Fetches the unit's questions from `source` and runs the quiz on stdin
/// until the student quits or input ends.
pub async fn run(session: &mut QuizSession, source: &dyn QuestionSource) -> io::Result<()> {
    match source.questions_for_unit(session.unit_id()).await {
        Ok(questions) => {
            if let Err(e) = session.load(questions) {
                session.load_failed(&e);
            }
        }
        Err(e) => session.load_failed(&e),
    }

    println!("{}", render_screen(session));
    if session.phase() == QuizPhase::Empty {
        session.dispose();
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<u64>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let option_count = session.current_question().map_or(0, |q| q.options.len());
                match react(session, parse_quiz_input(&line, option_count)) {
                    Reaction::Quit => break,
                    Reaction::Show(text) => println!("{}", text),
                    Reaction::Scheduled { output, advance } => {
                        println!("{}", output);
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let _ = tx.send(advance.wait().await);
                        });
                    }
                }
            }
            Some(generation) = rx.recv() => {
                if session.advance(generation) {
                    println!("\n{}", render_screen(session));
                }
            }
        }
    }

    debug!("Quiz input loop ended in phase {:?}", session.phase());
    session.dispose();
    info!("Quiz session closed");
    Ok(())
}
