//! OpenRouter provider implementation using the Chat Completions API.

use async_trait::async_trait;

use super::send_chat_completion;
use crate::core::config::DEFAULT_OPENROUTER_BASE_URL;
use crate::inference::{Completion, CompletionProvider, CompletionRequest, ProviderError};

/// OpenRouter API provider (hosted, bearer-key auth)
pub struct OpenRouterProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Creates a new OpenRouter provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenRouter API key
    /// * `base_url` - Optional custom base URL (defaults to OpenRouter's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::Config(
                "OpenRouter API key is empty".to_string(),
            ));
        }
        send_chat_completion(
            &self.client,
            self.name(),
            &self.base_url,
            Some(&self.api_key),
            request,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let provider = OpenRouterProvider::new("key".to_string(), None);
        assert_eq!(provider.base_url(), "https://openrouter.ai/api/v1");
        assert_eq!(provider.name(), "openrouter");
    }

    #[tokio::test]
    async fn test_empty_key_is_config_error() {
        let provider = OpenRouterProvider::new("  ".to_string(), None);
        let request = CompletionRequest {
            messages: &[],
            model: "m",
            max_output_tokens: None,
        };
        let result = provider.complete(request).await;
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }
}
