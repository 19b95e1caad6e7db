//! API Routes
//!
//! Thin HTTP layer over the retrieval services:
//! - `/` and `/health` - liveness
//! - `/search` - orchestrated search plus related keywords
//! - `/summarize` - single-document summary
//! - `/integrate`, `/integrate-tree` - multi-document synthesis

pub mod health;
pub mod integrate;
pub mod search;
pub mod summarize;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(health::router())
        .merge(search::router(state.clone()))
        .merge(summarize::router(state.clone()))
        .merge(integrate::router(state))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origins)
}
