//! # REST Server
//!
//! axum front end over the core. Every handler is a thin translation from
//! JSON to a core call and back.
//!
//! ```text
//!  request ──► log_requests ──► Router ──► handler ──► AppState
//!                  │                                     ├─ ExplanationProvider
//!                  ▼                                     ├─ QuestionBank
//!          "POST /api/... 200 12ms"                      ├─ CourseCatalog
//!                                                        └─ EventLog
//! ```
//!
//! | Route                               | Handler                         |
//! |-------------------------------------|---------------------------------|
//! | `POST /api/explain-concept`         | [`handlers::explain_concept`]   |
//! | `GET  /api/practice-questions/{id}` | [`handlers::practice_questions`]|
//! | `POST /api/practice-answers`        | [`handlers::practice_answers`]  |
//! | `POST /api/analytics`               | [`handlers::track_event`]       |
//! | `GET  /api/analytics`               | [`handlers::list_events`]       |
//! | `DELETE /api/analytics`             | [`handlers::clear_events`]      |
//! | anything else                       | 404 `{"error": "Not found"}`    |

pub mod error;
pub mod handlers;

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use log::info;
use tokio::net::TcpListener;

use crate::core::{CourseCatalog, EventLog, QuestionBank};
use crate::inference::ExplanationProvider;

pub use error::ApiError;

/// Shared handler state. Cloned per request; everything inside is a handle.
#[derive(Clone)]
pub struct AppState {
    pub explainer: Arc<dyn ExplanationProvider>,
    pub questions: Arc<QuestionBank>,
    pub courses: Arc<CourseCatalog>,
    pub events: EventLog,
}

impl AppState {
    /// State over the built-in course catalog and question bank.
    pub fn new(explainer: Arc<dyn ExplanationProvider>, events: EventLog) -> Self {
        Self {
            explainer,
            questions: Arc::new(QuestionBank::builtin()),
            courses: Arc::new(CourseCatalog::builtin()),
            events,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/explain-concept", post(handlers::explain_concept))
        .route(
            "/api/practice-questions/{unit_id}",
            get(handlers::practice_questions),
        )
        .route("/api/practice-answers", post(handlers::practice_answers))
        .route(
            "/api/analytics",
            post(handlers::track_event)
                .get(handlers::list_events)
                .delete(handlers::clear_events),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Tutor API listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} {}ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
