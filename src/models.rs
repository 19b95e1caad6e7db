use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agents::{ContentItem, IntegrationAgent, SummaryAgent, TreeNode};
use crate::config::Config;
use crate::keywords::KeywordCascade;
use crate::llm::LLM;
use crate::search::{Cc98SearchAdapter, QianfanSearchAdapter, ResultItem, SearchOrchestrator};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<SearchOrchestrator>,
    pub keywords: Arc<KeywordCascade>,
    pub summary: Arc<SummaryAgent>,
    pub integration: Arc<IntegrationAgent>,
}

impl AppState {
    /// Wire every service around one shared HTTP client.
    ///
    /// The CC98 adapter (and its token session) lives for the whole process.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let client = config.http.build_client()?;

        let direct = Arc::new(QianfanSearchAdapter::from_config(&config.search, client.clone()));
        let session = Arc::new(Cc98SearchAdapter::new(config.cc98.clone(), client.clone()));
        let orchestrator = Arc::new(SearchOrchestrator::new(direct, session));

        let llm = LLM::from_config(&config.llm, client);
        let keywords = Arc::new(KeywordCascade::from_llm(&llm));
        let summary = Arc::new(SummaryAgent::new(llm));
        let integration = Arc::new(IntegrationAgent::new(summary.clone()));

        Ok(Self {
            config,
            orchestrator,
            keywords,
            summary,
            integration,
        })
    }
}

fn default_max_results() -> usize {
    5
}

fn default_keywords_count() -> usize {
    5
}

fn default_search_source() -> String {
    "baidu".to_string()
}

fn default_max_length() -> usize {
    200
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_keywords_count")]
    pub generate_keywords_count: usize,
    /// Kept as a plain string so unknown names reach the direct source
    /// instead of failing deserialization.
    #[serde(default = "default_search_source")]
    pub search_source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub original_keyword: String,
    pub search_results: Vec<ResultItem>,
    pub generated_keywords: Vec<String>,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub content: String,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub original_content: String,
    pub summary: String,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrateRequest {
    pub contents: Vec<ContentItem>,
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrateTreeRequest {
    pub nodes: Vec<TreeNode>,
    pub main_keyword: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerResponse {
    pub message: String,
    pub version: String,
}
