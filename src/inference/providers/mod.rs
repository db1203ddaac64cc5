//! Chat-completion providers.
//!
//! Both backends speak the OpenAI-style `POST {base}/chat/completions`
//! shape, so the wire types and the request/response handling live here and
//! each provider only decides the URL and the auth.

mod lmstudio;
mod openrouter;

pub use lmstudio::LmStudioProvider;
pub use openrouter::OpenRouterProvider;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{Completion, CompletionRequest, Message, ProviderError};

// ============================================================================
// Chat Completions API Types
// ============================================================================

/// The request body for `/chat/completions`
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Assistant message in a choice. `content` can be null (e.g. refusals).
#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Shared request handling
// ============================================================================

/// Sends one chat completion and returns the first choice.
async fn send_chat_completion(
    client: &reqwest::Client,
    provider: &str,
    base_url: &str,
    api_key: Option<&str>,
    request: CompletionRequest<'_>,
) -> Result<Completion, ProviderError> {
    let body = ChatRequest {
        model: request.model,
        messages: request.messages,
        max_tokens: request.max_output_tokens,
        stream: false,
    };

    info!(
        "{} chat completion request: model={}, message_count={}, max_tokens={:?}",
        provider,
        request.model,
        request.messages.len(),
        request.max_output_tokens,
    );

    let mut builder = client
        .post(format!("{}/chat/completions", base_url.trim_end_matches('/')))
        .json(&body);
    if let Some(key) = api_key {
        builder = builder.bearer_auth(key);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    debug!("{} response status: {}", provider, response.status());

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let err_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("{} API error: {} - {}", provider, status, err_body);
        return Err(ProviderError::Api {
            status,
            message: err_body,
        });
    }

    let raw = response
        .text()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;
    debug!("{} raw response: {} bytes", provider, raw.len());

    parse_chat_response(&raw)
}

fn parse_chat_response(raw: &str) -> Result<Completion, ProviderError> {
    let parsed: ChatResponse =
        serde_json::from_str(raw).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("response contained no choices".to_string()))?;

    Ok(Completion {
        content: choice.message.content.unwrap_or_default(),
        id: parsed.id,
        finish_reason: choice.finish_reason,
    })
}
