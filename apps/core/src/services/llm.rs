//! HTTP chat-completions client.
//!
//! Implements `GenerationService` against an OpenAI-style chat endpoint.
//! The base URL is configurable so tests (and self-hosted deployments)
//! can point it anywhere.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::services::traits::GenerationService;

// --- Constants ---
const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant and professional CV expert.";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// Generation client speaking the chat-completions wire format.
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn build_request(&self, payload: &serde_json::Value) -> reqwest::RequestBuilder {
        let mut headers = HeaderMap::new();
        if let Ok(auth_value) = format!("Bearer {}", self.api_key).parse() {
            headers.insert(AUTHORIZATION, auth_value);
        }

        self.client
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH))
            .headers(headers)
            .json(payload)
    }
}

#[async_trait]
impl GenerationService for ChatCompletionsClient {
    async fn generate(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, AppError> {
        debug!("Requesting completion ({} prompt chars)", prompt.len());

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
                },
                { "role": "user", "content": prompt },
            ],
            "temperature": temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "max_tokens": max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        let response = self.build_request(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationFailure(format!(
                "completion request failed with status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let reply: ChatCompletionReply = serde_json::from_str(&body)?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::GenerationFailure(
                "completion returned empty content".to_string(),
            ));
        }

        Ok(content.to_string())
    }
}
