//! CC98 forum search
//!
//! ## Flow
//!
//! 1. Make sure a bearer token exists (password grant).
//! 2. Keyword search returns topic ids. An empty or non-JSON body (or a 401)
//!    means the token went stale: refresh once, retry once, then give up.
//! 3. For each id, fetch the topic and page through replies (10 per page)
//!    until the first post is found; it supplies the content.
//! 4. Topics that are gone or unreadable are skipped.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Cc98Config;
use crate::search::session::TokenSession;
use crate::search::{EngagementMetrics, ResultItem, SearchAdapter, SearchSource};
use crate::types::{AppError, AppResult};
use crate::utils::truncate_with_ellipsis;

const REPLY_PAGE_SIZE: u64 = 10;
const SNIPPET_CHARS: usize = 200;

const TOPIC_NOT_EXISTS: &str = "topic_not_exists";
const TOPIC_IS_DELETED: &str = "topic_is_deleted";

/// Body of a CC98 API call after sentinel handling.
#[derive(Debug)]
enum Fetched {
    Json(Value),
    /// Topic missing or deleted
    Gone(&'static str),
    Empty,
}

#[derive(Debug, Deserialize)]
struct TopicHit {
    id: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TopicInfo {
    id: u64,
    board_id: Option<i64>,
    title: Option<String>,
    time: Option<String>,
    user_name: Option<String>,
    hit_count: Option<i64>,
    best_state: Option<i64>,
    favorite_count: Option<i64>,
    reply_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PostInfo {
    content: Option<String>,
    like_count: Option<i64>,
    dislike_count: Option<i64>,
    awards: Option<Vec<Value>>,
}

/// A topic joined with its main post. Only lives until mapped into a
/// [`ResultItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct TopicRecord {
    pub id: u64,
    pub board_id: i64,
    pub title: String,
    pub time: String,
    /// Unix seconds; 0 when the time is missing or unparseable
    pub timestamp: i64,
    pub author: String,
    pub hit_count: i64,
    pub best_state: bool,
    pub favorite_count: i64,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub awards_count: i64,
}

impl TopicRecord {
    fn from_parts(topic: TopicInfo, post: PostInfo) -> Self {
        let time = topic.time.unwrap_or_default();
        Self {
            id: topic.id,
            board_id: topic.board_id.unwrap_or_default(),
            title: topic.title.unwrap_or_default(),
            timestamp: parse_timestamp(&time),
            time,
            author: topic.user_name.unwrap_or_default(),
            hit_count: topic.hit_count.unwrap_or_default(),
            best_state: topic.best_state == Some(1),
            favorite_count: topic.favorite_count.unwrap_or_default(),
            content: post.content.unwrap_or_default(),
            like_count: post.like_count.unwrap_or_default(),
            dislike_count: post.dislike_count.unwrap_or_default(),
            awards_count: post.awards.map(|a| a.len() as i64).unwrap_or_default(),
        }
    }

    pub fn into_result_item(self, web_base_url: &str) -> ResultItem {
        ResultItem {
            snippet: truncate_with_ellipsis(&self.content, SNIPPET_CHARS),
            url: format!("{}/topic/{}", web_base_url.trim_end_matches('/'), self.id),
            source: SearchSource::Cc98,
            author: Some(self.author),
            published_at: Some(self.timestamp),
            engagement_metrics: Some(EngagementMetrics {
                like_count: self.like_count,
                dislike_count: self.dislike_count,
                hit_count: self.hit_count,
                favorite_count: self.favorite_count,
                awards_count: self.awards_count,
            }),
            title: self.title,
        }
    }
}

/// RFC 3339, or a naive timestamp in China Standard Time.
fn parse_timestamp(time: &str) -> i64 {
    if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        return dt.timestamp();
    }
    let cst = FixedOffset::east_opt(8 * 3600);
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .zip(cst)
        .and_then(|(naive, offset)| offset.from_local_datetime(&naive).single())
        .map(|dt| dt.timestamp())
        .unwrap_or(0)
}

pub struct Cc98SearchAdapter {
    config: Cc98Config,
    session: TokenSession,
}

impl Cc98SearchAdapter {
    pub fn new(config: Cc98Config, client: reqwest::Client) -> Self {
        let session = TokenSession::new(client, config.clone());
        Self { config, session }
    }

    pub fn session(&self) -> &TokenSession {
        &self.session
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    /// One GET. Sentinel bodies win over any status; a 401 wins over an
    /// empty body.
    async fn fetch(&self, url: &str) -> AppResult<Fetched> {
        let response = self.session.authorized_get(url).await.send().await?;
        let status = response.status();
        // a body cut off mid-read is a transport failure, not bad data
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        match body.as_str() {
            TOPIC_NOT_EXISTS => return Ok(Fetched::Gone(TOPIC_NOT_EXISTS)),
            TOPIC_IS_DELETED => return Ok(Fetched::Gone(TOPIC_IS_DELETED)),
            _ => {}
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Auth(format!("{} rejected the token", url)));
        }
        if body.is_empty() {
            return Ok(Fetched::Empty);
        }
        if !status.is_success() {
            return Err(AppError::upstream(status, body));
        }

        Ok(Fetched::Json(serde_json::from_str(&body)?))
    }

    /// Fetch with at most one refresh-and-retry when the token looks stale.
    ///
    /// `empty_is_stale` decides whether an empty body counts as a stale token
    /// (the search endpoint) or simply as no data (topic endpoints).
    async fn fetch_with_refresh(&self, url: &str, empty_is_stale: bool) -> Option<Fetched> {
        let observed = self.session.token().await;

        match self.fetch(url).await {
            Ok(Fetched::Empty) if empty_is_stale => {
                warn!(url = %url, "CC98 returned an empty body, refreshing token");
            }
            Ok(fetched) => return Some(fetched),
            Err(e @ (AppError::Auth(_) | AppError::MalformedResponse(_))) => {
                warn!(url = %url, error = %e, "CC98 token looks stale, refreshing");
            }
            Err(e) => {
                warn!(url = %url, error = %e, "CC98 request failed");
                return None;
            }
        }

        if let Err(e) = self.session.refresh(observed.as_deref()).await {
            warn!(error = %e, "CC98 token refresh failed");
            return None;
        }

        match self.fetch(url).await {
            Ok(Fetched::Empty) if empty_is_stale => {
                warn!(url = %url, "CC98 still returned an empty body after refresh");
                None
            }
            Ok(fetched) => Some(fetched),
            Err(e) => {
                warn!(url = %url, error = %e, "CC98 request failed after refresh");
                None
            }
        }
    }

    async fn search_topic_ids(&self, query: &str, count: usize) -> Vec<u64> {
        let url = self.api(&format!(
            "/topic/search?keyword={}&size={}&from=0",
            urlencoding::encode(query),
            count
        ));
        debug!(url = %url, "CC98 search");

        match self.fetch_with_refresh(&url, true).await {
            Some(Fetched::Json(value)) => match serde_json::from_value::<Vec<TopicHit>>(value) {
                Ok(hits) => hits.into_iter().map(|h| h.id).collect(),
                Err(e) => {
                    warn!(error = %e, "Unexpected CC98 search payload");
                    Vec::new()
                }
            },
            _ => Vec::new(),
        }
    }

    /// Resolve one topic id into a record, or `None` to skip it.
    async fn fetch_topic(&self, topic_id: u64) -> Option<TopicRecord> {
        let topic_url = self.api(&format!("/Topic/{}?sf_request_type=fetch", topic_id));
        let topic: TopicInfo = match self.fetch_with_refresh(&topic_url, false).await? {
            Fetched::Json(value) => serde_json::from_value(value).ok()?,
            Fetched::Gone(reason) => {
                info!(topic_id, reason, "CC98 topic unavailable, skipping");
                return None;
            }
            Fetched::Empty => return None,
        };

        let pages = topic.reply_count.unwrap_or_default() / REPLY_PAGE_SIZE + 1;
        for page in 0..pages {
            let url = self.api(&format!(
                "/Topic/{}/post?from={}&size={}&sf_request_type=fetch",
                topic_id,
                page * REPLY_PAGE_SIZE,
                REPLY_PAGE_SIZE
            ));
            if let Some(Fetched::Json(Value::Array(posts))) = self.fetch_with_refresh(&url, false).await {
                if let Some(first) = posts.into_iter().next() {
                    let post: PostInfo = serde_json::from_value(first).ok()?;
                    return Some(TopicRecord::from_parts(topic, post));
                }
            }
        }

        None
    }
}

#[async_trait]
impl SearchAdapter for Cc98SearchAdapter {
    fn source(&self) -> SearchSource {
        SearchSource::Cc98
    }

    async fn search(&self, query: &str, count: usize) -> Vec<ResultItem> {
        if !self.config.has_credentials() {
            warn!("CC98 credentials not configured, skipping CC98 search");
            return Vec::new();
        }
        if count == 0 {
            return Vec::new();
        }

        info!(query = %query, count, "Searching CC98");

        if let Err(e) = self.session.ensure().await {
            warn!(error = %e, "CC98 authentication failed");
            return Vec::new();
        }

        let topic_ids = self.search_topic_ids(query, count).await;
        info!(topics = topic_ids.len(), "CC98 search returned topics");

        let mut results = Vec::new();
        for topic_id in topic_ids.into_iter().take(count) {
            match self.fetch_topic(topic_id).await {
                Some(record) => results.push(record.into_result_item(&self.config.web_base_url)),
                None => debug!(topic_id, "CC98 topic skipped"),
            }
        }

        info!(count = results.len(), "CC98 search completed");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn config(server: &Server) -> Cc98Config {
        Cc98Config {
            username: "alice".to_string(),
            password: "pw".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            api_base_url: server.url(),
            auth_url: format!("{}/connect/token", server.url()),
            web_base_url: "https://www.cc98.org".to_string(),
        }
    }

    async fn token_mock(server: &mut Server, expected: usize) -> mockito::Mock {
        server
            .mock("POST", "/connect/token")
            .with_status(200)
            .with_body(r#"{"access_token":"tok"}"#)
            .expect(expected)
            .create_async()
            .await
    }

    async fn topic_mocks(server: &mut Server, id: u64, content: &str) {
        server
            .mock("GET", format!("/Topic/{}", id).as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "id": id,
                    "boardId": 68,
                    "title": format!("topic {}", id),
                    "time": "2024-03-01T08:00:00+08:00",
                    "userName": "bob",
                    "hitCount": 120,
                    "bestState": 1,
                    "favoriteCount": 3,
                    "replyCount": 4
                })
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("GET", format!("/Topic/{}/post", id).as_str())
            .match_query(Matcher::UrlEncoded("from".into(), "0".into()))
            .with_status(200)
            .with_body(
                serde_json::json!([{
                    "content": content,
                    "likeCount": 7,
                    "dislikeCount": 1,
                    "awards": [{}, {}]
                }])
                .to_string(),
            )
            .create_async()
            .await;
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("2024-03-01T08:00:00+08:00"), 1_709_251_200);
        assert_eq!(parse_timestamp("2024-03-01T08:00:00Z"), 1_709_280_000);
        assert_eq!(parse_timestamp("2024-03-01T08:00:00.123"), 1_709_251_200);
        assert_eq!(parse_timestamp(""), 0);
        assert_eq!(parse_timestamp("yesterday"), 0);
    }

    #[test]
    fn test_record_maps_to_result_item() {
        let topic = TopicInfo {
            id: 42,
            title: Some("保研".to_string()),
            time: Some("2024-03-01T08:00:00+08:00".to_string()),
            user_name: Some("bob".to_string()),
            hit_count: Some(10),
            best_state: Some(1),
            ..Default::default()
        };
        let post = PostInfo {
            content: Some("字".repeat(250)),
            like_count: Some(3),
            awards: Some(vec![Value::Null; 2]),
            ..Default::default()
        };

        let record = TopicRecord::from_parts(topic, post);
        assert!(record.best_state);
        assert_eq!(record.awards_count, 2);

        let item = record.into_result_item("https://www.cc98.org/");
        assert_eq!(item.url, "https://www.cc98.org/topic/42");
        assert_eq!(item.snippet.chars().count(), 203);
        assert!(item.snippet.ends_with("..."));
        assert_eq!(item.source, SearchSource::Cc98);
        assert_eq!(item.engagement_metrics.unwrap().like_count, 3);
    }

    #[tokio::test]
    async fn test_missing_credentials_makes_no_calls() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 0).await;
        let mut cfg = config(&server);
        cfg.username.clear();

        let adapter = Cc98SearchAdapter::new(cfg, reqwest::Client::new());
        assert!(adapter.search("保研", 5).await.is_empty());
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_resolves_topics_and_skips_deleted() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 1).await;
        server
            .mock("GET", "/topic/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("keyword".into(), "保研".into()),
                Matcher::UrlEncoded("size".into(), "3".into()),
            ]))
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#)
            .create_async()
            .await;
        topic_mocks(&mut server, 1, "first post").await;
        server
            .mock("GET", "/Topic/2")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(TOPIC_IS_DELETED)
            .create_async()
            .await;
        topic_mocks(&mut server, 3, "third post").await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        let results = adapter.search("保研", 3).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "topic 1");
        assert_eq!(results[0].snippet, "first post");
        assert_eq!(results[0].author.as_deref(), Some("bob"));
        assert_eq!(results[1].url, "https://www.cc98.org/topic/3");
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_search_body_refreshes_exactly_once() {
        let mut server = Server::new_async().await;
        // initial acquisition + one refresh
        let token = token_mock(&mut server, 2).await;
        let search = server
            .mock("GET", "/topic/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("")
            .expect(2)
            .create_async()
            .await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        assert!(adapter.search("保研", 5).await.is_empty());

        search.assert_async().await;
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_search_refreshes_once() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 2).await;
        let rejected = server
            .mock("GET", "/topic/search")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("unauthorized")
            .expect(2)
            .create_async()
            .await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        assert!(adapter.search("保研", 5).await.is_empty());

        rejected.assert_async().await;
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_refreshed_session_serves_next_search() {
        let mut server = Server::new_async().await;
        token_mock(&mut server, 1).await;
        server
            .mock("GET", "/topic/search")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"[{"id": 9}]"#)
            .create_async()
            .await;
        topic_mocks(&mut server, 9, "hello").await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        adapter.session().refresh(None).await.unwrap();

        let results = adapter.search("保研", 1).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].snippet, "hello");
    }

    #[tokio::test]
    async fn test_reply_pages_walk_until_first_post() {
        let mut server = Server::new_async().await;
        token_mock(&mut server, 1).await;
        server
            .mock("GET", "/Topic/5")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id": 5, "title": "t", "replyCount": 25}"#)
            .create_async()
            .await;
        let page0 = server
            .mock("GET", "/Topic/5/post")
            .match_query(Matcher::UrlEncoded("from".into(), "0".into()))
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;
        let page1 = server
            .mock("GET", "/Topic/5/post")
            .match_query(Matcher::UrlEncoded("from".into(), "10".into()))
            .with_status(200)
            .with_body(r#"[{"content": "found", "likeCount": 2}]"#)
            .expect(1)
            .create_async()
            .await;
        let page2 = server
            .mock("GET", "/Topic/5/post")
            .match_query(Matcher::UrlEncoded("from".into(), "20".into()))
            .with_status(200)
            .with_body("[]")
            .expect(0)
            .create_async()
            .await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        adapter.session().ensure().await.unwrap();
        let record = adapter.fetch_topic(5).await.unwrap();

        assert_eq!(record.content, "found");
        assert_eq!(record.like_count, 2);
        page0.assert_async().await;
        page1.assert_async().await;
        page2.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_topic_is_skipped_without_refresh() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 1).await;
        server
            .mock("GET", "/Topic/7")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(TOPIC_NOT_EXISTS)
            .create_async()
            .await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        adapter.session().ensure().await.unwrap();
        assert!(adapter.fetch_topic(7).await.is_none());
        token.assert_async().await;
    }

    /// Seed the session with `tok-1`, then make the token endpoint hand out
    /// `tok-2` exactly once.
    async fn seed_then_rotate(server: &mut Server, adapter: &Cc98SearchAdapter) -> mockito::Mock {
        let first = server
            .mock("POST", "/connect/token")
            .with_status(200)
            .with_body(r#"{"access_token":"tok-1"}"#)
            .expect(1)
            .create_async()
            .await;
        adapter.session().ensure().await.unwrap();
        first.assert_async().await;
        first.remove_async().await;

        server
            .mock("POST", "/connect/token")
            .with_status(200)
            .with_body(r#"{"access_token":"tok-2"}"#)
            .expect(1)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_unauthorized_empty_topic_body_refreshes_and_retries() {
        let mut server = Server::new_async().await;
        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        let refresh = seed_then_rotate(&mut server, &adapter).await;

        let stale = server
            .mock("GET", "/Topic/5")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer tok-1")
            .with_status(401)
            .with_body("")
            .expect(1)
            .create_async()
            .await;
        let fresh = server
            .mock("GET", "/Topic/5")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer tok-2")
            .with_status(200)
            .with_body(r#"{"id": 5, "title": "renewed", "replyCount": 0}"#)
            .expect(1)
            .create_async()
            .await;
        server
            .mock("GET", "/Topic/5/post")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"content": "main post"}]"#)
            .create_async()
            .await;

        let record = adapter.fetch_topic(5).await.unwrap();
        assert_eq!(record.title, "renewed");
        assert_eq!(adapter.session().token().await.as_deref(), Some("tok-2"));
        stale.assert_async().await;
        fresh.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_topic_gives_up_after_one_retry() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 2).await;
        let topic = server
            .mock("GET", "/Topic/5")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("")
            .expect(2)
            .create_async()
            .await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        adapter.session().ensure().await.unwrap();
        assert!(adapter.fetch_topic(5).await.is_none());

        topic.assert_async().await;
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_json_topic_body_refreshes_once() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 2).await;
        let topic = server
            .mock("GET", "/Topic/6")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>login</html>")
            .expect(2)
            .create_async()
            .await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        adapter.session().ensure().await.unwrap();
        assert!(adapter.fetch_topic(6).await.is_none());

        topic.assert_async().await;
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_json_reply_page_refreshes_once() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 2).await;
        server
            .mock("GET", "/Topic/8")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id": 8, "title": "t", "replyCount": 0}"#)
            .expect(1)
            .create_async()
            .await;
        let page = server
            .mock("GET", "/Topic/8/post")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .expect(2)
            .create_async()
            .await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        adapter.session().ensure().await.unwrap();
        assert!(adapter.fetch_topic(8).await.is_none());

        page.assert_async().await;
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_search_body_then_results_after_refresh() {
        let mut server = Server::new_async().await;
        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        let refresh = seed_then_rotate(&mut server, &adapter).await;

        let stale = server
            .mock("GET", "/topic/search")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_body("")
            .expect(1)
            .create_async()
            .await;
        let fresh = server
            .mock("GET", "/topic/search")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer tok-2")
            .with_status(200)
            .with_body(r#"[{"id": 4}]"#)
            .expect(1)
            .create_async()
            .await;
        topic_mocks(&mut server, 4, "after refresh").await;

        let results = adapter.search("保研", 5).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].snippet, "after refresh");
        stale.assert_async().await;
        fresh.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_skips_only_that_topic() {
        use std::io::Write;

        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, 1).await;
        server
            .mock("GET", "/topic/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#)
            .create_async()
            .await;
        topic_mocks(&mut server, 1, "first post").await;
        let broken = server
            .mock("GET", "/Topic/2")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                w.write_all(b"{\"id\": 2")?;
                Err(std::io::Error::other("connection reset"))
            })
            .expect(1)
            .create_async()
            .await;
        topic_mocks(&mut server, 3, "third post").await;

        let adapter = Cc98SearchAdapter::new(config(&server), reqwest::Client::new());
        let results = adapter.search("保研", 3).await;

        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["topic 1", "topic 3"]);
        broken.assert_async().await;
        token.assert_async().await;
    }
}
