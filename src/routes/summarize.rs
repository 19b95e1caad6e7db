use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::agents::SUMMARY_UNAVAILABLE;
use crate::models::{AppState, SummarizeRequest, SummarizeResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(post_summarize))
        .with_state(state)
}

pub async fn post_summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    info!(chars = request.content.chars().count(), max_length = request.max_length, "Received summarize request");

    let summary = state.summary.summarize(&request.content, request.max_length).await;
    let success = summary != SUMMARY_UNAVAILABLE;
    let message = if success {
        "Summary generated".to_string()
    } else {
        "Summary could not be generated".to_string()
    };

    Json(SummarizeResponse {
        original_content: request.content,
        summary,
        success,
        message,
    })
}
