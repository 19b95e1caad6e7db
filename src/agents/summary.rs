//! Summary Agent
//!
//! Summarizes a piece of content with the LLM, falling back to a local
//! extractive summary whenever the LLM is unavailable.

use tracing::{info, warn};

use crate::llm::LLM;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};
use crate::utils::truncate_with_ellipsis;

/// Returned when neither the LLM nor the local summarizer produced text.
pub const SUMMARY_UNAVAILABLE: &str = "摘要生成失败";

const SYSTEM_PROMPT: &str = "你是一个专业的内容分析助手，擅长提炼要点、整合信息并生成结构清晰的总结。";

const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?', '\n'];

pub struct SummaryAgent {
    llm: LLM,
}

impl SummaryAgent {
    pub fn new(llm: LLM) -> Self {
        Self { llm }
    }

    /// Token budget for a response of roughly `max_length` characters.
    fn max_tokens_for(max_length: usize) -> u32 {
        (max_length.saturating_mul(2)).clamp(64, 4096) as u32
    }

    /// Single LLM call shared by summaries and integrations.
    pub async fn complete(&self, prompt: &str, max_length: usize) -> AppResult<String> {
        let request = LLMRequest {
            model: self.llm.model().to_string(),
            messages: vec![LLMMessage::system(SYSTEM_PROMPT), LLMMessage::user(prompt)],
            max_tokens: Some(Self::max_tokens_for(max_length)),
            temperature: Some(0.3),
        };

        let response = self.llm.create_chat_completion(&request).await?;
        let content = response.content.trim();
        if content.is_empty() {
            return Err(AppError::MalformedResponse("LLM returned an empty summary".to_string()));
        }
        Ok(content.to_string())
    }

    /// Never fails: LLM summary, else extractive summary, else the sentinel.
    pub async fn summarize(&self, content: &str, max_length: usize) -> String {
        let prompt = format!(
            "请用不超过{max_length}字概括以下内容，保留核心观点和关键信息：\n\n{content}"
        );

        match self.complete(&prompt, max_length).await {
            Ok(summary) => {
                info!(len = summary.chars().count(), "LLM summary generated");
                summary
            }
            Err(e) => {
                warn!(error = %e, "LLM summary failed, using extractive summary");
                let summary = extractive_summary(content, max_length);
                if summary.is_empty() {
                    SUMMARY_UNAVAILABLE.to_string()
                } else {
                    summary
                }
            }
        }
    }
}

fn split_sentences(content: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, c) in content.char_indices() {
        if SENTENCE_TERMINATORS.contains(&c) {
            let end = idx + c.len_utf8();
            sentences.push(&content[start..end]);
            start = end;
        }
    }
    if start < content.len() {
        sentences.push(&content[start..]);
    }
    sentences
}

/// Whole sentences from the start while they fit in `max_length`
/// characters; hard truncation when not even the first one fits.
pub fn extractive_summary(content: &str, max_length: usize) -> String {
    let mut summary = String::new();
    let mut length = 0;

    for sentence in split_sentences(content) {
        if sentence.trim().is_empty() {
            continue;
        }
        let sentence_len = sentence.chars().count();
        if length + sentence_len > max_length {
            break;
        }
        summary.push_str(sentence);
        length += sentence_len;
    }

    if summary.trim().is_empty() {
        return if content.trim().is_empty() {
            String::new()
        } else {
            truncate_with_ellipsis(content, max_length)
        };
    }
    summary.trim().to_string()
}
