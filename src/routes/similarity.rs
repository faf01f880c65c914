// Similarity API routes
//
// - POST /v1/similarity   - score one prompt pair
// - POST /v1/dedup        - check a candidate against existing prompts
// - POST /v1/dedup/groups - group near duplicates within a batch

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::AppState;
use crate::utils::error::{AppError, Result};
use crate::utils::prompt_similarity::{
    check_duplicate, find_duplicate_groups, DuplicateGroup, MatchResult, SimilarityBreakdown,
    SimilarityStrategy,
};

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    /// Absent prompts are treated as empty
    #[serde(default)]
    pub prompt_a: Option<String>,
    #[serde(default)]
    pub prompt_b: Option<String>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub score: f64,
    pub threshold: f64,
    pub duplicate: bool,
    pub strategy: SimilarityStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<SimilarityBreakdown>,
}

#[derive(Debug, Deserialize)]
pub struct DedupRequest {
    #[serde(default)]
    pub candidate: Option<String>,
    #[serde(default)]
    pub existing: Vec<String>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DedupGroupsRequest {
    #[serde(default)]
    pub prompts: Vec<String>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DedupGroupsResponse {
    pub threshold: f64,
    pub groups: Vec<DuplicateGroup>,
}

/// Use the request threshold if given, else the configured one
fn resolve_threshold(state: &AppState, requested: Option<f64>) -> Result<f64> {
    match requested {
        None => Ok(state.settings.similarity.duplicate_threshold),
        Some(t) if (0.0..=1.0).contains(&t) => Ok(t),
        Some(t) => Err(AppError::BadRequest(format!(
            "threshold must be within [0, 1], got {}",
            t
        ))),
    }
}

/// Reject prompts above the configured length cap
fn ensure_within_cap(state: &AppState, field: &str, prompt: &str) -> Result<()> {
    let max = state.settings.similarity.max_prompt_chars;
    // Byte length bounds char count from above; skip the count for short prompts
    if prompt.len() > max && prompt.chars().count() > max {
        return Err(AppError::InvalidInput(format!(
            "{} exceeds {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Score one prompt pair
pub async fn handle_similarity(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SimilarityRequest>, JsonRejection>,
) -> Result<Json<SimilarityResponse>> {
    let Json(request) = payload?;
    let threshold = resolve_threshold(&state, request.threshold)?;

    let prompt_a = request.prompt_a.unwrap_or_default();
    let prompt_b = request.prompt_b.unwrap_or_default();
    ensure_within_cap(&state, "prompt_a", &prompt_a)?;
    ensure_within_cap(&state, "prompt_b", &prompt_b)?;

    let engine = state.engine;
    let (result, breakdown) = tokio::task::spawn_blocking(move || {
        engine.evaluate_detailed(&prompt_a, &prompt_b, threshold)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("scoring task failed: {}", e)))?;

    debug!(
        score = result.score,
        threshold,
        duplicate = result.passed,
        "similarity request scored"
    );

    Ok(Json(SimilarityResponse {
        score: result.score,
        threshold,
        duplicate: result.passed,
        strategy: engine.strategy,
        breakdown,
    }))
}

/// Check a candidate prompt against caller-supplied prompts
pub async fn handle_dedup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DedupRequest>, JsonRejection>,
) -> Result<Json<MatchResult>> {
    let Json(request) = payload?;
    let threshold = resolve_threshold(&state, request.threshold)?;

    let candidate = request.candidate.unwrap_or_default();
    ensure_within_cap(&state, "candidate", &candidate)?;
    for (index, prompt) in request.existing.iter().enumerate() {
        ensure_within_cap(&state, &format!("existing[{}]", index), prompt)?;
    }

    let engine = state.engine;
    let existing = request.existing;
    let result = tokio::task::spawn_blocking(move || {
        check_duplicate(&engine, &candidate, &existing[..], threshold)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("dedup task failed: {}", e)))?;

    if result.duplicate {
        info!(
            best_match = ?result.best_match,
            threshold,
            "candidate prompt is a near duplicate"
        );
    }

    Ok(Json(result))
}

/// Group near-duplicate prompts within one batch
pub async fn handle_dedup_groups(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DedupGroupsRequest>, JsonRejection>,
) -> Result<Json<DedupGroupsResponse>> {
    let Json(request) = payload?;
    let threshold = resolve_threshold(&state, request.threshold)?;

    for (index, prompt) in request.prompts.iter().enumerate() {
        ensure_within_cap(&state, &format!("prompts[{}]", index), prompt)?;
    }

    let engine = state.engine;
    let prompts = request.prompts;
    let groups = tokio::task::spawn_blocking(move || {
        find_duplicate_groups(&engine, &prompts[..], threshold)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("grouping task failed: {}", e)))?;

    debug!(groups = groups.len(), threshold, "dedup groups computed");

    Ok(Json(DedupGroupsResponse { threshold, groups }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_settings;
    use std::sync::Arc;

    fn state_with_cap(max_prompt_chars: usize) -> AppState {
        let mut settings = test_settings();
        settings.similarity.max_prompt_chars = max_prompt_chars;
        AppState::new(Arc::new(settings))
    }

    #[test]
    fn test_resolve_threshold() {
        let state = state_with_cap(100);
        assert_eq!(resolve_threshold(&state, None).unwrap(), 0.9);
        assert_eq!(resolve_threshold(&state, Some(0.5)).unwrap(), 0.5);
        assert!(matches!(
            resolve_threshold(&state, Some(1.2)),
            Err(AppError::BadRequest(_))
        ));
        assert!(resolve_threshold(&state, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_ensure_within_cap_counts_chars() {
        let state = state_with_cap(4);
        assert!(ensure_within_cap(&state, "p", "abcd").is_ok());
        // 4 chars, 8 bytes
        assert!(ensure_within_cap(&state, "p", "éééé").is_ok());
        assert!(matches!(
            ensure_within_cap(&state, "p", "abcde"),
            Err(AppError::InvalidInput(_))
        ));
    }
}
