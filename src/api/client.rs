use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    AnalyticsRequest, ErrorResponse, ExplainConceptRequest, ExplainConceptResponse,
    PracticeAnswerRequest, SuccessResponse,
};
use crate::core::{AnalyticsEvent, AnswerCheck, CourseContext, Question, QuestionSource};
use crate::inference::{Explanation, ExplanationProvider, ProviderError};

/// HTTP client for a running `tutor serve` backend.
///
/// Implements [`ExplanationProvider`] and [`QuestionSource`], so the
/// terminal sessions can run against a remote server unchanged.
/// # Example
/// ```no_run
/// use tutor::api::TutorClient;
/// # async fn demo() -> Result<(), tutor::inference::ProviderError> {
/// let client = TutorClient::new("http://127.0.0.1:3001");
/// let questions = client.practice_questions("unit1").await?;
/// println!("{} questions", questions.len());
/// # Ok(())
/// # }
/// ```
pub struct TutorClient {
    base_url: String,
    client: reqwest::Client,
}

impl TutorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn explain_concept(
        &self,
        request: &ExplainConceptRequest,
    ) -> Result<ExplainConceptResponse, ProviderError> {
        let url = self.endpoint(&["api", "explain-concept"])?;
        let response = self.client.post(url).json(request).send().await;
        decode(response).await
    }

    pub async fn practice_questions(&self, unit_id: &str) -> Result<Vec<Question>, ProviderError> {
        let url = self.endpoint(&["api", "practice-questions", unit_id])?;
        let response = self.client.get(url).send().await;
        decode(response).await
    }

    pub async fn check_answer(
        &self,
        question_id: &str,
        selected_answer: Option<usize>,
    ) -> Result<AnswerCheck, ProviderError> {
        let url = self.endpoint(&["api", "practice-answers"])?;
        let body = PracticeAnswerRequest {
            question_id: question_id.to_string(),
            selected_answer: selected_answer.map(Value::from),
        };
        let response = self.client.post(url).json(&body).send().await;
        decode(response).await
    }

    pub async fn track_event(
        &self,
        event_name: &str,
        event_data: Value,
    ) -> Result<(), ProviderError> {
        let url = self.endpoint(&["api", "analytics"])?;
        let body = AnalyticsRequest {
            event_name: event_name.to_string(),
            event_data,
        };
        let response = self.client.post(url).json(&body).send().await;
        let ack: SuccessResponse = decode(response).await?;
        if !ack.success {
            warn!("Server did not acknowledge analytics event {}", event_name);
        }
        Ok(())
    }

    /// Dumps the server's analytics log.
    pub async fn events(&self) -> Result<Vec<AnalyticsEvent>, ProviderError> {
        let url = self.endpoint(&["api", "analytics"])?;
        let response = self.client.get(url).send().await;
        decode(response).await
    }

    /// Builds `{base_url}/seg/seg/...`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ProviderError::Config(format!("bad server URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::Config(format!("server URL {} can't have a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turns a response into `T`, mapping transport failures, error statuses
/// and bad bodies onto [`ProviderError`].
async fn decode<T: DeserializeOwned>(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, ProviderError> {
    let response = response.map_err(|e| ProviderError::Network(e.to_string()))?;
    let status = response.status();
    debug!("Tutor API {} -> {}", response.url(), status);

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))
}

#[async_trait]
impl ExplanationProvider for TutorClient {
    async fn explain(
        &self,
        question: &str,
        course: &CourseContext,
    ) -> Result<Explanation, ProviderError> {
        let request = ExplainConceptRequest {
            question: question.to_string(),
            course_id: Some(course.course_id.clone()),
            unit_id: Some(course.current_unit.id.clone()),
        };
        let response = self.explain_concept(&request).await?;
        Ok(Explanation {
            text: response.explanation,
            confidence: response.confidence,
            request_id: response.question_id,
        })
    }
}

#[async_trait]
impl QuestionSource for TutorClient {
    async fn questions_for_unit(&self, unit_id: &str) -> Result<Vec<Question>, ProviderError> {
        self.practice_questions(unit_id).await
    }
}
