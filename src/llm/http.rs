// Raw HTTP chat-completion binding
//
// Same request semantics as the managed client, issued directly with reqwest.
// Used when the managed client's transport is unavailable.

use crate::config::LLMConfig;
use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest, LLMResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct RawHttpChatAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [LLMMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl RawHttpChatAdapter {
    pub fn new(config: &LLMConfig, client: Client) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Operator hint for the statuses this endpoint is known to return.
    fn status_hint(status: StatusCode) -> Option<&'static str> {
        match status {
            StatusCode::UNAUTHORIZED => Some("API key invalid"),
            StatusCode::PAYMENT_REQUIRED => Some("payment required or balance exhausted"),
            StatusCode::TOO_MANY_REQUESTS => Some("rate limit exceeded"),
            _ => None,
        }
    }
}

#[async_trait]
impl LLMAdapter for RawHttpChatAdapter {
    fn name(&self) -> &'static str {
        "raw-http"
    }

    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration("LLM API key not configured".to_string()));
        }

        let body = ChatRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };

        let url = self.endpoint();
        debug!(url = %url, "Sending raw chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() && e.is_timeout() {
                    warn!(url = %url, "Chat completion connect timeout");
                } else {
                    warn!(url = %url, error = %e, "Chat completion request failed");
                }
                AppError::from(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            match Self::status_hint(status) {
                Some(hint) => warn!(status = %status, hint, body = %message, "Chat completion rejected"),
                None => warn!(status = %status, body = %message, "Chat completion rejected"),
            }
            return Err(AppError::upstream(status, message));
        }

        let text = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&text)?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::MalformedResponse("LLM returned no choices".to_string()))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| AppError::MalformedResponse("LLM returned empty content".to_string()))?;

        let usage = chat
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(LLMResponse {
            content,
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
            usage,
        })
    }
}
