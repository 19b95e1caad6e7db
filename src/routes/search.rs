use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::models::{AppState, SearchRequest, SearchResponse};
use crate::search::SearchSource;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(post_search))
        .with_state(state)
}

/// Keywords are generated only when the search found something.
pub async fn post_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let source = SearchSource::from_name(&request.search_source);
    info!(keyword = %request.keyword, source = %source, "Received search request");

    let results = state
        .orchestrator
        .resolve(source, &request.keyword, request.max_results)
        .await;

    if results.is_empty() {
        return Json(SearchResponse {
            original_keyword: request.keyword,
            search_results: Vec::new(),
            generated_keywords: Vec::new(),
            success: false,
            message: "No search results found. Check the search service configuration or try another keyword."
                .to_string(),
        });
    }

    let generated = state
        .keywords
        .generate(&request.keyword, request.generate_keywords_count)
        .await;

    let message = format!(
        "Found {} results and generated {} related keywords",
        results.len(),
        generated.len()
    );

    Json(SearchResponse {
        original_keyword: request.keyword,
        search_results: results,
        generated_keywords: generated,
        success: true,
        message,
    })
}
