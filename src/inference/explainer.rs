//! # Explanation Provider
//!
//! Turns a student's question into a course-grounded explanation.
//!
//! ```text
//! question + CourseContext
//!        │
//!        ▼
//!  build_system_prompt()  ──►  [system, user]  ──►  CompletionProvider
//!                                                         │
//!                              Explanation ◄──────────────┘
//! ```
//!
//! [`ExplanationProvider`] is the seam the Q&A session and the HTTP handler
//! depend on. [`CompletionExplainer`] is the real implementation; the API
//! client is another.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::core::course::CourseContext;
use crate::inference::{CompletionProvider, CompletionRequest, Message, ProviderError};

/// Confidence reported for every generated explanation. The completion
/// service gives no calibrated score, so this is a fixed placeholder.
pub const DEFAULT_CONFIDENCE: f32 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub text: String,
    pub confidence: f32,
    pub request_id: String,
}

#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(
        &self,
        question: &str,
        course: &CourseContext,
    ) -> Result<Explanation, ProviderError>;
}

/// Builds the tutor's system prompt from the course description.
pub fn build_system_prompt(course: &CourseContext) -> String {
    let topics = course
        .key_topics
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an AI tutor for the course \"{}\".\n\
         \n\
         Key concepts in this course include:\n\
         {}\n\
         \n\
         Current unit: {}\n\
         \n\
         Provide a clear, concise explanation of the concept. Use simple language \
         appropriate for students. Focus only on explaining the concept, not on \
         completing assignments for the student.",
        course.course_name, topics, course.current_unit.name
    )
}

/// Explanation provider backed by a chat-completion service.
pub struct CompletionExplainer {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    max_output_tokens: u32,
}

impl CompletionExplainer {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model: String,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            provider,
            model,
            max_output_tokens,
        }
    }
}

#[async_trait]
impl ExplanationProvider for CompletionExplainer {
    async fn explain(
        &self,
        question: &str,
        course: &CourseContext,
    ) -> Result<Explanation, ProviderError> {
        let messages = [
            Message::system(build_system_prompt(course)),
            Message::user(question),
        ];
        let request = CompletionRequest {
            messages: &messages,
            model: &self.model,
            max_output_tokens: Some(self.max_output_tokens),
        };

        let completion = self.provider.complete(request).await?;
        let text = completion.content.trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::Parse(
                "completion contained no text".to_string(),
            ));
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        info!(
            "Explanation ready via {}: request_id={}, {} chars",
            self.provider.name(),
            request_id,
            text.len()
        );
        debug!("Completion id={:?}, finish_reason={:?}", completion.id, completion.finish_reason);

        Ok(Explanation {
            text,
            confidence: DEFAULT_CONFIDENCE,
            request_id,
        })
    }
}
