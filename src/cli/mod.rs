//! # Terminal Adapters
//!
//! Line-oriented front ends for the two sessions. They own stdin, the
//! feedback timer and all printing; the sessions in [`crate::core`] stay
//! I/O free.
//!
//! - [`quiz`]: `tutor quiz`
//! - [`concept`]: `tutor ask`
//!
//! Each adapter splits into a pure part (parse a line, react, render to a
//! `String`) that is unit tested, and a small `run` loop that does the I/O.

pub mod concept;
pub mod quiz;

use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::api::TutorClient;
use crate::core::EventLog;
use crate::core::config::ResolvedConfig;
use crate::inference::{
    CompletionExplainer, CompletionProvider, ExplanationProvider, LmStudioProvider,
    OpenRouterProvider, ProviderError,
};

/// Column the tutor's replies are wrapped at.
pub const WRAP_WIDTH: usize = 80;

pub fn build_provider(
    config: &ResolvedConfig,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    match config.provider.as_str() {
        "lmstudio" => Ok(Arc::new(LmStudioProvider::new(Some(
            config.lmstudio_base_url.clone(),
        )))),
        _ => {
            let api_key = config.openrouter_api_key.clone().ok_or_else(|| {
                ProviderError::Config(
                    "OpenRouter API key must be set (config file, OPENROUTER_API_KEY env var, or --provider lm-studio)"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(OpenRouterProvider::new(
                api_key,
                Some(config.openrouter_base_url.clone()),
            )))
        }
    }
}

/// The completion-backed explainer for the configured provider and model.
pub fn build_explainer(
    config: &ResolvedConfig,
) -> Result<Arc<dyn ExplanationProvider>, ProviderError> {
    let provider = build_provider(config)?;
    info!("Using {} with model {}", provider.name(), config.model_name);
    Ok(Arc::new(CompletionExplainer::new(
        provider,
        config.model_name.clone(),
        config.max_output_tokens,
    )))
}

/// Wraps `text` to [`WRAP_WIDTH`] with every line indented by `indent`.
/// Existing line breaks are kept.
pub fn wrap_indented(text: &str, indent: &str) -> String {
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, options)
}

/// Pretty JSON of everything recorded so far.
pub fn dump_events(events: &EventLog) -> String {
    serde_json::to_string_pretty(&events.read_all()).unwrap_or_else(|_| "[]".to_string())
}

/// Posts every locally recorded event to the server's analytics sink.
/// Stops at the first failure and returns how many were delivered.
pub async fn forward_events(client: &TutorClient, events: &EventLog) -> usize {
    let mut delivered = 0;
    for event in events.read_all() {
        if let Err(e) = client.track_event(&event.name, Value::Object(event.data)).await {
            warn!("Failed to forward analytics event {}: {}", event.name, e);
            break;
        }
        delivered += 1;
    }
    delivered
}
