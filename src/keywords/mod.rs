//! Keyword Generation
//!
//! Related search keywords come from a cascade of tiers, best first:
//!
//! ```text
//! LLM (managed client) ─┐
//! LLM (raw HTTP)       ─┤ first non-empty output wins
//! Statistical          ─┤
//! Lexical              ─┘ always succeeds (possibly empty)
//! ```
//!
//! A tier either produces keywords, produces nothing, or fails; the cascade
//! only cares whether to move on.

pub mod extract;
pub mod lexical;
pub mod llm;

pub use extract::StatisticalTier;
pub use lexical::LexicalTier;
pub use llm::LlmKeywordTier;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm::LLM;
use crate::types::{AppError, AppResult};

#[async_trait]
pub trait KeywordTier: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, text: &str, count: usize) -> AppResult<Vec<String>>;
}

/// Outcome of one tier, used only to decide whether to continue.
#[derive(Debug)]
pub enum GenerationAttempt {
    Produced(Vec<String>),
    Empty,
    Failed(AppError),
}

impl From<AppResult<Vec<String>>> for GenerationAttempt {
    fn from(result: AppResult<Vec<String>>) -> Self {
        match result {
            Ok(keywords) if keywords.is_empty() => GenerationAttempt::Empty,
            Ok(keywords) => GenerationAttempt::Produced(keywords),
            Err(e) => GenerationAttempt::Failed(e),
        }
    }
}

pub struct KeywordCascade {
    tiers: Vec<Box<dyn KeywordTier>>,
}

impl KeywordCascade {
    pub fn new(tiers: Vec<Box<dyn KeywordTier>>) -> Self {
        Self { tiers }
    }

    /// One LLM tier per transport binding, then the local tiers.
    pub fn from_llm(llm: &LLM) -> Self {
        let mut tiers: Vec<Box<dyn KeywordTier>> = llm
            .bindings()
            .iter()
            .map(|binding| {
                Box::new(LlmKeywordTier::new(binding.clone(), llm.model())) as Box<dyn KeywordTier>
            })
            .collect();
        tiers.push(Box::new(StatisticalTier::default()));
        tiers.push(Box::new(LexicalTier::default()));
        Self::new(tiers)
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Never fails; at most `count` keywords in the winning tier's order.
    pub async fn generate(&self, text: &str, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }

        for tier in &self.tiers {
            match GenerationAttempt::from(tier.generate(text, count).await) {
                GenerationAttempt::Produced(mut keywords) => {
                    keywords.truncate(count);
                    info!(tier = tier.name(), count = keywords.len(), "Keywords generated");
                    return keywords;
                }
                GenerationAttempt::Empty => {
                    info!(tier = tier.name(), "Keyword tier produced nothing, trying next");
                }
                GenerationAttempt::Failed(e) => {
                    warn!(tier = tier.name(), error = %e, "Keyword tier failed, trying next");
                }
            }
        }

        warn!("All keyword tiers exhausted");
        Vec::new()
    }
}
