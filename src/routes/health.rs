use axum::{routing::get, Json, Router};

use crate::models::{BannerResponse, HealthResponse};

pub fn router() -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}

async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Search assistant API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Service is running".to_string(),
    })
}
