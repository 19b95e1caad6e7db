// LLM abstraction layer
//
// One chat-completion capability with two interchangeable bindings:
// the managed async-openai client and a raw reqwest transport.

pub mod provider;
pub mod openai;
pub mod http;

pub use provider::*;
pub use openai::ManagedChatAdapter;
pub use http::RawHttpChatAdapter;
pub use crate::types::{LLMMessage, LLMRequest, LLMResponse, TokenUsage};
