use std::sync::Arc;

use tracing::{info, warn};

use crate::search::{ResultItem, SearchAdapter, SearchSource};

/// Routes a search to the requested backend, falling back once to the direct
/// backend when the requested one comes back empty.
pub struct SearchOrchestrator {
    direct: Arc<dyn SearchAdapter>,
    session: Arc<dyn SearchAdapter>,
}

impl SearchOrchestrator {
    pub fn new(direct: Arc<dyn SearchAdapter>, session: Arc<dyn SearchAdapter>) -> Self {
        Self { direct, session }
    }

    fn adapter(&self, source: SearchSource) -> &Arc<dyn SearchAdapter> {
        match source {
            SearchSource::Baidu => &self.direct,
            SearchSource::Cc98 => &self.session,
        }
    }

    pub async fn resolve(&self, source: SearchSource, query: &str, count: usize) -> Vec<ResultItem> {
        info!(source = %source, query = %query, count, "Resolving search");

        let results = self.adapter(source).search(query, count).await;
        if !results.is_empty() || source == self.direct.source() {
            return results;
        }

        warn!(source = %source, "No results from requested source, falling back to direct search");
        self.direct.search(query, count).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedAdapter {
        source: SearchSource,
        titles: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl FixedAdapter {
        fn new(source: SearchSource, titles: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                source,
                titles,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchAdapter for FixedAdapter {
        fn source(&self) -> SearchSource {
            self.source
        }

        async fn search(&self, query: &str, count: usize) -> Vec<ResultItem> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.titles
                .iter()
                .take(count)
                .map(|t| ResultItem {
                    title: t.to_string(),
                    snippet: query.to_string(),
                    url: format!("https://example.com/{}", t),
                    source: self.source,
                    author: None,
                    published_at: None,
                    engagement_metrics: None,
                })
                .collect()
        }
    }

    #[tokio::test]
    async fn test_session_results_returned_without_fallback() {
        let direct = FixedAdapter::new(SearchSource::Baidu, vec!["web"]);
        let session = FixedAdapter::new(SearchSource::Cc98, vec!["forum"]);
        let orchestrator = SearchOrchestrator::new(direct.clone(), session.clone());

        let results = orchestrator.resolve(SearchSource::Cc98, "保研", 5).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, SearchSource::Cc98);
        assert_eq!(direct.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_session_falls_back_to_direct_output() {
        let direct = FixedAdapter::new(SearchSource::Baidu, vec!["a", "b", "c"]);
        let session = FixedAdapter::new(SearchSource::Cc98, vec![]);
        let orchestrator = SearchOrchestrator::new(direct.clone(), session.clone());

        let resolved = orchestrator.resolve(SearchSource::Cc98, "保研", 2).await;
        let direct_only = direct.search("保研", 2).await;
        assert_eq!(resolved, direct_only);
        assert_eq!(session.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_direct_does_not_retry() {
        let direct = FixedAdapter::new(SearchSource::Baidu, vec![]);
        let session = FixedAdapter::new(SearchSource::Cc98, vec!["forum"]);
        let orchestrator = SearchOrchestrator::new(direct.clone(), session.clone());

        assert!(orchestrator.resolve(SearchSource::Baidu, "保研", 5).await.is_empty());
        assert_eq!(direct.calls(), 1);
        assert_eq!(session.calls(), 0);
    }

    #[tokio::test]
    async fn test_both_empty_is_single_level_fallback() {
        let direct = FixedAdapter::new(SearchSource::Baidu, vec![]);
        let session = FixedAdapter::new(SearchSource::Cc98, vec![]);
        let orchestrator = SearchOrchestrator::new(direct.clone(), session.clone());

        assert!(orchestrator.resolve(SearchSource::Cc98, "保研", 5).await.is_empty());
        assert_eq!(session.calls(), 1);
        assert_eq!(direct.calls(), 1);
    }
}
