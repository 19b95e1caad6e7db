use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::agents::IntegrationOutcome;
use crate::models::{AppState, IntegrateRequest, IntegrateTreeRequest};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/integrate", post(post_integrate))
        .route("/integrate-tree", post(post_integrate_tree))
        .with_state(state)
}

pub async fn post_integrate(
    State(state): State<AppState>,
    Json(request): Json<IntegrateRequest>,
) -> Json<IntegrationOutcome> {
    info!(keyword = %request.keyword, items = request.contents.len(), "Received integrate request");
    Json(state.integration.integrate(&request.contents, &request.keyword).await)
}

pub async fn post_integrate_tree(
    State(state): State<AppState>,
    Json(request): Json<IntegrateTreeRequest>,
) -> Json<IntegrationOutcome> {
    info!(keyword = %request.main_keyword, nodes = request.nodes.len(), "Received integrate-tree request");
    Json(
        state
            .integration
            .integrate_tree(&request.nodes, &request.main_keyword)
            .await,
    )
}
