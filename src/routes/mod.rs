pub mod health;
pub mod similarity;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::config::Settings;
use crate::utils::error::AppError;
use crate::utils::prompt_similarity::SimilarityEngine;

pub use health::{health_check, ping};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub engine: SimilarityEngine,
}

impl AppState {
    pub fn new(settings: Arc<Settings>) -> Self {
        let engine = SimilarityEngine::from_settings(&settings.similarity);
        Self { settings, engine }
    }
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ping", get(ping))
        .route("/v1/similarity", post(similarity::handle_similarity))
        .route("/v1/dedup", post(similarity::handle_dedup))
        .route("/v1/dedup/groups", post(similarity::handle_dedup_groups))
        .fallback(not_found)
        .with_state(state)
}

/// JSON 404 for unknown paths
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
