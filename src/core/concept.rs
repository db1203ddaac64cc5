//! # Concept Q&A Session
//!
//! A linear chat transcript between a student and the tutor. Each question
//! is handed to an [`ExplanationProvider`]; whatever happens there, the
//! student gets exactly one assistant turn back.
//!
//! `ask` borrows the session mutably for the whole round trip, so a second
//! question can't start while one is in flight.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::analytics::EventLog;
use crate::core::course::CourseContext;
use crate::inference::ExplanationProvider;

/// Shown in place of an explanation when the provider fails.
pub const FALLBACK_MESSAGE: &str =
    "I'm sorry, I couldn't process your question right now. Please try again later.";

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What is a cell membrane?",
    "How does photosynthesis work?",
    "What is the function of mitochondria?",
    "Explain the difference between prokaryotic and eukaryotic cells.",
];

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskError {
    /// The question was empty or only whitespace.
    EmptyQuestion,
}

impl fmt::Display for AskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AskError::EmptyQuestion => write!(f, "question must not be empty"),
        }
    }
}

impl std::error::Error for AskError {}

pub struct ConceptSession {
    transcript: Vec<ChatTurn>,
    course: CourseContext,
    explainer: Arc<dyn ExplanationProvider>,
    events: EventLog,
}

impl ConceptSession {
    pub fn new(
        course: CourseContext,
        explainer: Arc<dyn ExplanationProvider>,
        events: EventLog,
    ) -> Self {
        let transcript = vec![welcome_turn(&course)];
        Self {
            transcript,
            course,
            explainer,
            events,
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn course(&self) -> &CourseContext {
        &self.course
    }

    /// Suggestions are offered until the conversation gets going.
    pub fn show_suggestions(&self) -> bool {
        self.transcript.len() <= 2
    }

    pub fn suggested_questions(&self) -> &'static [&'static str] {
        &SUGGESTED_QUESTIONS
    }

    /// Asks the tutor a question and returns the assistant's reply turn.
    ///
    /// Provider failures never surface here: the reply is the fallback
    /// message instead. The only error is an empty question, in which case
    /// nothing is appended.
    pub async fn ask(&mut self, question: &str) -> Result<&ChatTurn, AskError> {
        if question.trim().is_empty() {
            return Err(AskError::EmptyQuestion);
        }

        self.push(ChatRole::User, question.to_string());
        self.events.record(
            "concept_question_asked",
            json!({
                "question": question,
                "courseId": self.course.course_id,
            }),
        );

        let reply = match self.explainer.explain(question, &self.course).await {
            Ok(explanation) => {
                debug!(
                    "Explanation received: request_id={}, {} chars",
                    explanation.request_id,
                    explanation.text.len()
                );
                self.events.record(
                    "concept_explanation_received",
                    json!({
                        "questionId": explanation.request_id,
                        "responseLength": explanation.text.chars().count(),
                        "confidence": explanation.confidence,
                    }),
                );
                explanation.text
            }
            Err(e) => {
                warn!("Error getting explanation: {}", e);
                self.events
                    .record("concept_explanation_error", json!({ "error": e.to_string() }));
                FALLBACK_MESSAGE.to_string()
            }
        };

        Ok(self.push(ChatRole::Assistant, reply))
    }

    /// Starts the conversation over from the welcome message.
    pub fn reset(&mut self) {
        self.transcript = vec![welcome_turn(&self.course)];
    }

    fn push(&mut self, role: ChatRole, content: String) -> &ChatTurn {
        let index = self.transcript.len();
        self.transcript.push(ChatTurn { role, content });
        &self.transcript[index]
    }
}

fn welcome_turn(course: &CourseContext) -> ChatTurn {
    ChatTurn {
        role: ChatRole::Assistant,
        content: format!(
            "Hi there! I'm your learning assistant for {}. What concept would you like me to explain?",
            course.course_name
        ),
    }
}
