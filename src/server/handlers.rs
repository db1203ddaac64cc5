use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use log::{debug, error, info};

use super::AppState;
use super::error::ApiError;
use crate::api::types::{
    AnalyticsRequest, ExplainConceptRequest, ExplainConceptResponse, PracticeAnswerRequest,
    SuccessResponse,
};
use crate::core::{AnalyticsEvent, AnswerCheck, Question};

const EXPLANATION_FAILED: &str = "Failed to generate explanation";

pub async fn explain_concept(
    State(state): State<AppState>,
    payload: Result<Json<ExplainConceptRequest>, JsonRejection>,
) -> Result<Json<ExplainConceptResponse>, ApiError> {
    let Json(request) = payload?;

    let question = request.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".to_string()));
    }

    let course = state
        .courses
        .context(request.course_id.as_deref(), request.unit_id.as_deref());
    info!(
        "Explaining concept for {}/{}",
        course.course_id, course.current_unit.id
    );

    match state.explainer.explain(question, &course).await {
        Ok(explanation) => Ok(Json(ExplainConceptResponse {
            question_id: explanation.request_id,
            explanation: explanation.text,
            confidence: explanation.confidence,
        })),
        Err(e) => {
            error!("Explanation failed: {}", e);
            Err(ApiError::Internal(EXPLANATION_FAILED.to_string()))
        }
    }
}

pub async fn practice_questions(
    State(state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Json<Vec<Question>> {
    let questions = state.questions.for_unit(&unit_id);
    debug!("Unit {} has {} practice questions", unit_id, questions.len());
    Json(questions)
}

pub async fn practice_answers(
    State(state): State<AppState>,
    payload: Result<Json<PracticeAnswerRequest>, JsonRejection>,
) -> Result<Json<AnswerCheck>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(
        state
            .questions
            .check_answer(&request.question_id, request.selected_index()),
    ))
}

pub async fn track_event(
    State(state): State<AppState>,
    payload: Result<Json<AnalyticsRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload?;
    if request.event_name.trim().is_empty() {
        return Err(ApiError::BadRequest("eventName must not be empty".to_string()));
    }
    state.events.record(&request.event_name, request.event_data);
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn list_events(State(state): State<AppState>) -> Json<Vec<AnalyticsEvent>> {
    Json(state.events.read_all())
}

pub async fn clear_events(State(state): State<AppState>) -> Json<SuccessResponse> {
    let count = state.events.len();
    state.events.clear();
    info!("Cleared {} analytics events", count);
    Json(SuccessResponse { success: true })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
