//! `tutor ask`: concept Q&A in a terminal.

use std::io::{self, Write};

use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::core::{ChatRole, ChatTurn, ConceptSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptInput {
    Ask(String),
    Reset,
    Help,
    Quit,
    Blank,
}

/// Reads a line. A bare number picks from `suggestions` (1-based) when any
/// are on offer; anything else that isn't a `/command` is a question.
pub fn parse_concept_input(line: &str, suggestions: &[&str]) -> ConceptInput {
    let input = line.trim();
    match input {
        "" => return ConceptInput::Blank,
        "/quit" | "/exit" | "/q" => return ConceptInput::Quit,
        "/reset" | "/new" => return ConceptInput::Reset,
        "/help" | "/?" => return ConceptInput::Help,
        _ => {}
    }

    if let Ok(n) = input.parse::<usize>()
        && let Some(suggestion) = n.checked_sub(1).and_then(|i| suggestions.get(i))
    {
        return ConceptInput::Ask(suggestion.to_string());
    }

    ConceptInput::Ask(input.to_string())
}

const HELP: &str = "\
Type a question and press Enter.
  /reset  start a new conversation
  /quit   leave";

pub fn render_turn(turn: &ChatTurn) -> String {
    match turn.role {
        ChatRole::User => format!("You: {}", turn.content),
        ChatRole::Assistant => format!("Tutor:\n{}", super::wrap_indented(&turn.content, "  ")),
    }
}

pub fn render_suggestions(suggestions: &[&str]) -> String {
    let mut out = String::from("Suggested questions:");
    for (i, s) in suggestions.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, s));
    }
    out
}

fn offered_suggestions(session: &ConceptSession) -> &'static [&'static str] {
    if session.show_suggestions() {
        session.suggested_questions()
    } else {
        &[]
    }
}

fn print_opening(session: &ConceptSession) {
    for turn in session.transcript() {
        println!("{}\n", render_turn(turn));
    }
    let suggestions = offered_suggestions(session);
    if !suggestions.is_empty() {
        println!("{}\n", render_suggestions(suggestions));
    }
}

/// Runs the Q&A loop on stdin until the student quits or input ends.
pub async fn run(session: &mut ConceptSession) -> io::Result<()> {
    print_opening(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_concept_input(&line, offered_suggestions(session)) {
            ConceptInput::Quit => break,
            ConceptInput::Blank => continue,
            ConceptInput::Help => println!("{}\n", HELP),
            ConceptInput::Reset => {
                session.reset();
                println!();
                print_opening(session);
            }
            ConceptInput::Ask(question) => {
                println!("Thinking...");
                if let Ok(reply) = session.ask(&question).await {
                    println!("{}\n", render_turn(reply));
                }
            }
        }
    }

    info!(
        "Concept session closed after {} turn(s)",
        session.transcript().len()
    );
    Ok(())
}
