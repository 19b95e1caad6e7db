use async_trait::async_trait;
use jieba_rs::Jieba;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::keywords::KeywordTier;
use crate::types::AppResult;
use crate::utils::is_cjk;

// Dictionary is loaded once per process
static SEGMENTER: LazyLock<Jieba> = LazyLock::new(Jieba::new);

/// Chinese function words plus common English stopwords.
pub const STOP_WORDS: &[&str] = &[
    // Chinese
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个",
    "上", "也", "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好",
    "自己", "这", "那", "什么", "怎么", "为什么", "如何", "哪些", "与", "或", "但",
    "而", "如果", "因为", "所以", "我们", "他们", "这个", "那个", "可以", "还是",
    // English
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have",
    "in", "is", "it", "its", "of", "on", "or", "that", "the", "to", "was", "will",
    "with", "do", "does", "can", "what", "where", "when", "why", "how", "who",
    "which", "this", "these", "those", "there", "here",
];

pub fn is_stop_word(token: &str) -> bool {
    let lower = token.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

/// Split on whitespace and punctuation, then segment CJK runs into words.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in text.split(|c: char| !c.is_alphanumeric()) {
        for segment in split_scripts(chunk) {
            if segment.chars().next().is_some_and(is_cjk) {
                tokens.extend(SEGMENTER.cut(segment, true));
            } else {
                tokens.push(segment);
            }
        }
    }
    tokens
}

/// Split a token where it switches between CJK and other characters.
pub(crate) fn split_scripts(token: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in token.char_indices() {
        let kind = is_cjk(c);
        match current {
            Some(prev) if prev != kind => {
                segments.push(&token[start..idx]);
                start = idx;
            }
            _ => {}
        }
        current = Some(kind);
    }
    if start < token.len() {
        segments.push(&token[start..]);
    }
    segments
}

/// Terminal tier: filtered, deduplicated tokens in input order. Never fails.
#[derive(Debug, Default)]
pub struct LexicalTier;

impl LexicalTier {
    pub fn extract(text: &str, count: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        tokenize(text)
            .into_iter()
            .filter(|token| token.chars().count() > 1 && !is_stop_word(token))
            .filter(|token| seen.insert(token.to_lowercase()))
            .take(count)
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl KeywordTier for LexicalTier {
    fn name(&self) -> &str {
        "lexical"
    }

    async fn generate(&self, text: &str, count: usize) -> AppResult<Vec<String>> {
        Ok(Self::extract(text, count))
    }
}
