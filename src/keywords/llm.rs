use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::keywords::KeywordTier;
use crate::llm::LLMAdapter;
use crate::types::{AppResult, LLMMessage, LLMRequest};

const SYSTEM_PROMPT: &str =
    "你是一个专业的关键词生成助手，能够根据文本内容生成相关的搜索关键词。";

/// Asks one chat-completion binding for related keywords.
///
/// Every failure (network, status, malformed body) is returned to the
/// cascade untouched.
pub struct LlmKeywordTier {
    adapter: Arc<dyn LLMAdapter>,
    model: String,
    name: String,
}

impl LlmKeywordTier {
    pub fn new(adapter: Arc<dyn LLMAdapter>, model: impl Into<String>) -> Self {
        let name = format!("llm:{}", adapter.name());
        Self {
            adapter,
            model: model.into(),
            name,
        }
    }

    fn prompt(text: &str, count: usize) -> String {
        format!(
            "基于以下文本，生成{count}个相关的搜索关键词。关键词应该：\n\
             1. 与原文内容高度相关\n\
             2. 适合用于网络搜索\n\
             3. 包含核心概念和重要术语\n\
             4. 长度适中（2-6个字符）\n\n\
             原文：{text}\n\n\
             请只返回关键词列表，每行一个关键词，不要其他解释："
        )
    }
}

/// One keyword per line; list markers are dropped.
pub fn parse_keyword_lines(content: &str, count: usize) -> Vec<String> {
    content
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(count)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let line = line
        .strip_prefix(&['-', '*', '•'][..])
        .unwrap_or(line)
        .trim_start();
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest
            .strip_prefix('.')
            .or_else(|| rest.strip_prefix('、'))
            .or_else(|| rest.strip_prefix(')'))
        {
            return rest.trim();
        }
    }
    line
}

#[async_trait]
impl KeywordTier for LlmKeywordTier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, text: &str, count: usize) -> AppResult<Vec<String>> {
        let request = LLMRequest {
            model: self.model.clone(),
            messages: vec![
                LLMMessage::system(SYSTEM_PROMPT),
                LLMMessage::user(Self::prompt(text, count)),
            ],
            max_tokens: Some(200),
            temperature: Some(0.7),
        };

        let response = self.adapter.create_chat_completion(&request).await?;
        debug!(tier = %self.name, content = %response.content, "LLM keyword response");
        Ok(parse_keyword_lines(&response.content, count))
    }
}
