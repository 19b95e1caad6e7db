//! Baidu Qianfan AI search client
//!
//! Stateless single call: the query is sent as the only chat message and the
//! response carries either `search_info.search_results` or `references`.
//! Any failure yields an empty result list.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::search::{ResultItem, SearchAdapter, SearchSource};
use crate::types::{AppError, AppResult};
use crate::utils::resolve_endpoint_host;

pub struct QianfanSearchAdapter {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    messages: [SearchMessage<'a>; 1],
}

#[derive(Serialize)]
struct SearchMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search_info: Option<SearchInfo>,
    #[serde(default)]
    references: Option<Vec<Reference>>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    search_results: Option<Vec<WebResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebResult {
    title: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Reference {
    title: Option<String>,
    content: Option<String>,
    url: Option<String>,
}

impl QianfanSearchAdapter {
    pub fn new(client: Client, api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &SearchConfig, client: Client) -> Self {
        Self::new(client, config.qianfan_api_key.clone(), config.qianfan_url.clone())
    }

    fn status_hint(status: StatusCode) -> Option<&'static str> {
        match status.as_u16() {
            400 => Some("request parameters rejected"),
            401 => Some("API key invalid or lacks permission"),
            403 => Some("quota exhausted or limit exceeded"),
            404 => Some("endpoint not found"),
            500 => Some("server-side execution error"),
            501 => Some("model service timed out"),
            502 => Some("model streaming output timed out"),
            _ => None,
        }
    }

    async fn fetch(&self, query: &str) -> AppResult<Vec<ResultItem>> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration("Baidu API key not configured".to_string()));
        }

        resolve_endpoint_host(&self.endpoint).await?;

        let body = SearchRequest {
            messages: [SearchMessage {
                role: "user",
                content: query,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            match Self::status_hint(status) {
                Some(hint) => warn!(status = %status, hint, body = %text, "Baidu search rejected"),
                None => warn!(status = %status, body = %text, "Baidu search rejected"),
            }
            return Err(AppError::upstream(status, text));
        }

        let text = response.text().await?;
        debug!(len = text.len(), "Baidu search response received");
        let parsed: SearchResponse = serde_json::from_str(&text)?;
        Ok(parse_results(parsed))
    }
}

fn parse_results(response: SearchResponse) -> Vec<ResultItem> {
    let item = |title: Option<String>, snippet: Option<String>, url: Option<String>| ResultItem {
        title: title.unwrap_or_default(),
        snippet: snippet.unwrap_or_default(),
        url: url.unwrap_or_default(),
        source: SearchSource::Baidu,
        author: None,
        published_at: None,
        engagement_metrics: None,
    };

    if let Some(results) = response.search_info.and_then(|info| info.search_results) {
        return results
            .into_iter()
            .map(|r| item(r.title, r.snippet, r.url))
            .collect();
    }

    response
        .references
        .unwrap_or_default()
        .into_iter()
        .map(|r| item(r.title, r.content, r.url))
        .collect()
}

#[async_trait]
impl SearchAdapter for QianfanSearchAdapter {
    fn source(&self) -> SearchSource {
        SearchSource::Baidu
    }

    async fn search(&self, query: &str, count: usize) -> Vec<ResultItem> {
        if count == 0 {
            return Vec::new();
        }

        info!(query = %query, count, "Searching Baidu");
        match self.fetch(query).await {
            Ok(mut results) => {
                results.truncate(count);
                info!(count = results.len(), "Baidu search completed");
                results
            }
            Err(e) => {
                warn!(error = %e, "Baidu search failed");
                Vec::new()
            }
        }
    }
}
