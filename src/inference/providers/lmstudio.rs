//! LM Studio provider implementation using the Chat Completions API.
//!
//! LM Studio serves an OpenAI-compatible `/v1/chat/completions` endpoint
//! locally, with no authentication.

use async_trait::async_trait;

use super::send_chat_completion;
use crate::core::config::DEFAULT_LMSTUDIO_BASE_URL;
use crate::inference::{Completion, CompletionProvider, CompletionRequest, ProviderError};

/// LM Studio API provider (local inference server)
pub struct LmStudioProvider {
    base_url: String,
    client: reqwest::Client,
}

impl LmStudioProvider {
    /// `None` means the default local server. Environment overrides are
    /// applied by [`config::resolve`](crate::core::config::resolve).
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionProvider for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        send_chat_completion(&self.client, self.name(), &self.base_url, None, request).await
    }
}
