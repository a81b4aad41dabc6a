pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ad Generation API
        .route("/api/v1/ads/generate", post(handlers::handle_generate))
        .route("/api/v1/ads/prompt", post(handlers::handle_prompt_preview))
        .route("/api/v1/ads/keywords", post(handlers::handle_scrape_keywords))
        .route(
            "/api/v1/ads/cta-suggestions",
            get(handlers::handle_cta_suggestions),
        )
        .with_state(state)
}
