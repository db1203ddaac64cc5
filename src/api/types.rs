//! Request and response bodies of the tutor's REST API. Shared by the
//! axum handlers and [`TutorClient`](super::TutorClient) so both sides
//! agree on the JSON shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /api/explain-concept`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplainConceptRequest {
    pub question: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub unit_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplainConceptResponse {
    pub question_id: String,
    pub explanation: String,
    pub confidence: f32,
}

/// `POST /api/practice-answers`. The response is an
/// [`AnswerCheck`](crate::core::AnswerCheck).
///
/// `selectedAnswer` is any JSON value; anything that isn't an option index
/// is graded as wrong rather than rejected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeAnswerRequest {
    pub question_id: String,
    #[serde(default)]
    pub selected_answer: Option<Value>,
}

impl PracticeAnswerRequest {
    /// The selection as an option index. `1` and `1.0` are index 1;
    /// strings, negatives, fractions and non-numbers are `None`.
    pub fn selected_index(&self) -> Option<usize> {
        let Some(Value::Number(n)) = &self.selected_answer else {
            return None;
        };
        let index = n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })?;
        usize::try_from(index).ok()
    }
}

/// `POST /api/analytics`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    pub event_name: String,
    #[serde(default)]
    pub event_data: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
