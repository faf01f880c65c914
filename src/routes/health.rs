use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::utils::prompt_similarity::{BlankPairPolicy, SimilarityStrategy};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub strategy: SimilarityStrategy,
    pub blank_pair_policy: BlankPairPolicy,
}

/// Health check handler
///
/// The engine has no external dependencies, so a running process is healthy.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategy: state.engine.strategy,
        blank_pair_policy: state.engine.blank_pair_policy,
    };

    (StatusCode::OK, Json(response))
}

/// Simple ping handler
pub async fn ping() -> &'static str {
    "pong"
}
