//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::course::CourseContext;
use crate::core::question_bank::Question;
use crate::inference::{Explanation, ExplanationProvider, ProviderError};

/// Answers every question with the same text and counts the calls.
pub struct FixedExplainer {
    text: String,
    calls: AtomicUsize,
}

impl FixedExplainer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExplanationProvider for FixedExplainer {
    async fn explain(
        &self,
        _question: &str,
        _course: &CourseContext,
    ) -> Result<Explanation, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Explanation {
            text: self.text.clone(),
            confidence: 0.9,
            request_id: format!("req-{n}"),
        })
    }
}

/// Always fails as if the completion service returned a 500.
pub struct FailingExplainer;

#[async_trait]
impl ExplanationProvider for FailingExplainer {
    async fn explain(
        &self,
        _question: &str,
        _course: &CourseContext,
    ) -> Result<Explanation, ProviderError> {
        Err(ProviderError::Api {
            status: 500,
            message: "upstream unavailable".to_string(),
        })
    }
}

/// Three four-option questions whose correct indices are `[1, 0, 2]`.
pub fn sample_questions() -> Vec<Question> {
    [("s1", 1), ("s2", 0), ("s3", 2)]
        .into_iter()
        .map(|(id, correct_answer)| Question {
            id: id.to_string(),
            text: format!("Question {id}?"),
            options: ["A", "B", "C", "D"].iter().map(|o| o.to_string()).collect(),
            correct_answer,
            explanation: None,
        })
        .collect()
}
