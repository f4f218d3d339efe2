//! Language Model Client
//!
//! `QueryTranslator` is the seam between query normalization and whatever answers the
//! translation prompt. `GroqClient` is the production implementation.

use super::prompt::{SYSTEM_INSTRUCTION, TEMPERATURE};
use super::protocol::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, GROQ_CHAT_COMPLETIONS_URL,
    ROLE_SYSTEM, ROLE_USER,
};

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Reply used when the provider answers without any message content.
const EMPTY_REPLY: &str = "{}";

/// Sends a raw query through the translation prompt and returns the model's reply text.
///
/// Implementations return the reply verbatim; parsing belongs to the normalizer.
#[async_trait]
pub trait QueryTranslator: Send + Sync {
    async fn translate(&self, query: &str) -> Result<String>;
}

/// Client for Groq's chat-completions API.
pub struct GroqClient {
    api_key: String,
    model: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: GROQ_CHAT_COMPLETIONS_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Points the client at a different completions URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl QueryTranslator for GroqClient {
    async fn translate(&self, query: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: ROLE_SYSTEM,
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: ROLE_USER,
                    content: query,
                },
            ],
            temperature: TEMPERATURE,
        };

        tracing::debug!("Sending query to language model ({})", self.model);

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Language model request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Language model returned {}: {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Language model response was not a chat completion")?;

        Ok(completion
            .first_content()
            .unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}
