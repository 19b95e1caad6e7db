//! Search Module
//!
//! Provides keyword search over two backends behind one capability:
//! - Baidu Qianfan AI search (direct) - stateless single call, always available
//! - CC98 forum (session) - password-grant token, per-topic enrichment
//!
//! The [`SearchOrchestrator`] dispatches by [`SearchSource`] and falls back to
//! the direct backend when the chosen one yields nothing.

pub mod cc98;
pub mod orchestrator;
pub mod qianfan;
pub mod session;

pub use cc98::Cc98SearchAdapter;
pub use orchestrator::SearchOrchestrator;
pub use qianfan::QianfanSearchAdapter;
pub use session::{AuthSession, TokenSession};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which backend a search request should go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    Baidu,
    Cc98,
}

impl SearchSource {
    /// Unknown names select the direct backend.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cc98" => SearchSource::Cc98,
            _ => SearchSource::Baidu,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSource::Baidu => "baidu",
            SearchSource::Cc98 => "cc98",
        }
    }
}

impl std::fmt::Display for SearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engagement counters reported by forum backends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub like_count: i64,
    pub dislike_count: i64,
    pub hit_count: i64,
    pub favorite_count: i64,
    pub awards_count: i64,
}

/// One search hit, tagged with the backend that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub source: SearchSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_metrics: Option<EngagementMetrics>,
}

#[async_trait]
pub trait SearchAdapter: Send + Sync {
    fn source(&self) -> SearchSource;

    /// Never fails: every error degrades to fewer (or zero) results.
    async fn search(&self, query: &str, count: usize) -> Vec<ResultItem>;
}
