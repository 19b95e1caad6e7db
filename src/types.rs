// Type definitions shared across the service

use reqwest::StatusCode;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LLMMessage {
    pub role: String, // "user", "assistant", "system"
    pub content: String,
}

impl LLMMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Failure taxonomy for every outbound call.
///
/// Components degrade on all of these except where a caller explicitly
/// reports the failure (content integration).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Credentials or endpoints missing; raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout, refused connection, DNS failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Token rejected or stale.
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Upstream {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// True when the failure happened before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::MalformedResponse(e.to_string())
        } else if let Some(status) = e.status() {
            AppError::upstream(status, e.to_string())
        } else {
            // timeouts, connect failures, request building and body errors
            AppError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::MalformedResponse(e.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;
        match e {
            OpenAIError::Reqwest(inner) => AppError::from(inner),
            OpenAIError::JSONDeserialize(inner) => AppError::MalformedResponse(inner.to_string()),
            other => AppError::LLMApi(other.to_string()),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
