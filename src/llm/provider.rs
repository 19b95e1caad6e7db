use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::config::LLMConfig;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    /// Short transport name used in logs.
    fn name(&self) -> &'static str;

    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Ordered set of chat-completion bindings for the same endpoint.
///
/// A binding is skipped only when its transport is unavailable; an answer
/// from upstream (even an error status) is final.
#[derive(Clone)]
pub struct LLM {
    bindings: Vec<Arc<dyn LLMAdapter>>,
    model: String,
}

impl LLM {
    pub fn new(bindings: Vec<Arc<dyn LLMAdapter>>, model: impl Into<String>) -> Self {
        Self {
            bindings,
            model: model.into(),
        }
    }

    /// Managed client first, raw HTTP second.
    pub fn from_config(config: &LLMConfig, client: reqwest::Client) -> Self {
        let managed: Arc<dyn LLMAdapter> =
            Arc::new(crate::llm::openai::ManagedChatAdapter::new(config, client.clone()));
        let raw: Arc<dyn LLMAdapter> =
            Arc::new(crate::llm::http::RawHttpChatAdapter::new(config, client));
        Self::new(vec![managed, raw], config.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn bindings(&self) -> &[Arc<dyn LLMAdapter>] {
        &self.bindings
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let mut last_error =
            AppError::Configuration("no chat-completion transport configured".to_string());

        for binding in &self.bindings {
            match binding.create_chat_completion(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transport() => {
                    warn!(transport = binding.name(), error = %e, "LLM transport unavailable, trying next binding");
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }
}
