use crate::config::LLMConfig;
use crate::llm::LLMAdapter;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest, LLMResponse, TokenUsage};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

/// Chat completions through the managed async-openai client, pointed at any
/// OpenAI-compatible base URL.
pub struct ManagedChatAdapter {
    client: Client<OpenAIConfig>,
    has_key: bool,
}

impl ManagedChatAdapter {
    pub fn new(config: &LLMConfig, http_client: reqwest::Client) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.base_url.trim_end_matches('/'));
        // No internal retries: a 429/5xx must surface at once
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(no_retry);
        Self {
            client,
            has_key: !config.api_key.is_empty(),
        }
    }

    fn convert_message(m: &LLMMessage) -> AppResult<ChatCompletionRequestMessage> {
        let message = match m.role.as_str() {
            "system" => ChatCompletionRequestSystemMessageArgs::default()
                .content(m.content.clone())
                .build()?
                .into(),
            "assistant" => ChatCompletionRequestAssistantMessageArgs::default()
                .content(m.content.clone())
                .build()?
                .into(),
            "user" => ChatCompletionRequestUserMessageArgs::default()
                .content(m.content.clone())
                .build()?
                .into(),
            other => {
                return Err(AppError::InvalidRequest(format!(
                    "Unknown message role: {}",
                    other
                )))
            }
        };
        Ok(message)
    }
}

#[async_trait]
impl LLMAdapter for ManagedChatAdapter {
    fn name(&self) -> &'static str {
        "managed"
    }

    #[allow(deprecated)] // DeepSeek still expects `max_tokens`
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        if !self.has_key {
            return Err(AppError::Configuration("LLM API key not configured".to_string()));
        }

        let messages = request
            .messages
            .iter()
            .map(Self::convert_message)
            .collect::<AppResult<Vec<_>>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(request.model.clone()).messages(messages);
        if let Some(max_tokens) = request.max_tokens {
            args.max_tokens(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            args.temperature(temperature);
        }

        let response = self.client.chat().create(args.build()?).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| AppError::MalformedResponse("LLM returned no choices".to_string()))?;
        let content = choice
            .message
            .content
            .clone()
            .ok_or_else(|| AppError::MalformedResponse("LLM returned empty content".to_string()))?;

        debug!(len = content.len(), "Managed chat completion received");

        let usage = response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(LLMResponse {
            content,
            finish_reason: choice
                .finish_reason
                .as_ref()
                .map(|r| format!("{:?}", r).to_lowercase())
                .unwrap_or_else(|| "stop".to_string()),
            usage,
        })
    }
}
