use std::fmt;

use async_trait::async_trait;

use super::types::{Completion, Message};

/// Why a completion, explanation or API call failed.
#[derive(Debug)]
pub enum ProviderError {
    /// Missing API key or unusable URL.
    Config(String),
    /// The request never got a response (DNS, connection refused, reset).
    Network(String),
    /// The server answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The response body was not what we expected, or had no text.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill a completion request.
pub struct CompletionRequest<'a> {
    pub messages: &'a [Message],
    pub model: &'a str,
    pub max_output_tokens: Option<u32>,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs one non-streaming chat completion.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, ProviderError>;
}
