/// Weighted multi-metric prompt similarity
///
/// Combines three independent metrics into one score in [0, 1]:
///
/// - lexical: Jaccard index over normalized token sets
/// - vector: cosine similarity over term-frequency vectors
/// - structural: formatting-pattern agreement on the raw prompts
///
/// Formula: score = 0.3 × jaccard + 0.4 × cosine + 0.3 × structural,
/// rounded half away from zero to 3 decimal places.
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::lexical::jaccard_similarity;
use super::normalizer::normalize_tokens;
use super::structural::structural_similarity;
use super::vector::cosine_similarity;

pub const JACCARD_WEIGHT: f64 = 0.3;
pub const COSINE_WEIGHT: f64 = 0.4;
pub const STRUCTURAL_WEIGHT: f64 = 0.3;

/// Decimal places kept on the final score
pub const SCORE_DECIMALS: i32 = 3;

/// Round a score to `SCORE_DECIMALS` places, half away from zero
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}

/// Unrounded sub-scores behind one weighted score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub jaccard: f64,
    pub cosine: f64,
    pub structural: f64,
    /// Weighted, rounded final score
    pub score: f64,
}

/// Compute all sub-scores for a prompt pair
///
/// Returns `None` when either prompt is empty; no metric is computed then.
pub fn similarity_breakdown(prompt1: &str, prompt2: &str) -> Option<SimilarityBreakdown> {
    if prompt1.is_empty() || prompt2.is_empty() {
        return None;
    }

    let tokens1 = normalize_tokens(prompt1);
    let tokens2 = normalize_tokens(prompt2);

    let jaccard = jaccard_similarity(&tokens1, &tokens2);
    let cosine = cosine_similarity(&tokens1, &tokens2);
    let structural = structural_similarity(prompt1, prompt2);

    let weighted =
        JACCARD_WEIGHT * jaccard + COSINE_WEIGHT * cosine + STRUCTURAL_WEIGHT * structural;
    let score = round_score(weighted).clamp(0.0, 1.0);

    trace!(
        jaccard,
        cosine,
        structural,
        score,
        tokens1 = tokens1.len(),
        tokens2 = tokens2.len(),
        "prompt similarity computed"
    );

    Some(SimilarityBreakdown {
        jaccard,
        cosine,
        structural,
        score,
    })
}

/// Calculate the similarity of two prompts
///
/// Returns 0.0 if either prompt is empty, otherwise the weighted score.
///
/// # Examples
///
/// ```
/// use prompt_capture::utils::prompt_similarity::similarity;
///
/// assert_eq!(similarity("Extract the revenue", "Extract the revenue"), 1.0);
/// assert_eq!(similarity("", "Extract the revenue"), 0.0);
/// ```
pub fn similarity(prompt1: &str, prompt2: &str) -> f64 {
    similarity_breakdown(prompt1, prompt2).map_or(0.0, |b| b.score)
}

/// Same as `similarity`, with absent prompts treated as empty
pub fn similarity_opt(prompt1: Option<&str>, prompt2: Option<&str>) -> f64 {
    similarity(prompt1.unwrap_or_default(), prompt2.unwrap_or_default())
}

/// Score compared against a threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub score: f64,
    pub threshold: f64,
    pub passed: bool,
}

impl SimilarityResult {
    pub fn new(score: f64, threshold: f64) -> Self {
        Self {
            score,
            threshold,
            passed: score >= threshold,
        }
    }
}

/// Calculate similarity and return detailed result
pub fn calculate_similarity(prompt1: &str, prompt2: &str, threshold: f64) -> SimilarityResult {
    SimilarityResult::new(similarity(prompt1, prompt2), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("hello world", "hello world"), 1.0);
    }

    #[test]
    fn test_similarity_empty_inputs() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("hello world", ""), 0.0);
        assert_eq!(similarity("", "hello world"), 0.0);
        assert!(similarity_breakdown("", "hello world").is_none());
    }

    #[test]
    fn test_similarity_opt_treats_none_as_empty() {
        assert_eq!(similarity_opt(None, Some("hello world")), 0.0);
        assert_eq!(similarity_opt(Some("hello world"), None), 0.0);
        assert_eq!(similarity_opt(None, None), 0.0);
        assert_eq!(similarity_opt(Some("hello world"), Some("hello world")), 1.0);
    }

    #[test]
    fn test_similarity_partial_match() {
        // tokens [hello, world] vs [hello, rust]
        // jaccard = 1/3, cosine = 1/2
        // structural: 7 categories absent on both sides -> 1.0 each, length 10/11
        // 0.1 + 0.2 + 0.3 × (7 + 10/11) / 8 = 0.59659... -> 0.597
        assert_eq!(similarity("hello world", "hello rust"), 0.597);

        let breakdown = similarity_breakdown("hello world", "hello rust").unwrap();
        assert!((breakdown.jaccard - 1.0 / 3.0).abs() < 1e-12);
        assert!((breakdown.cosine - 0.5).abs() < 1e-12);
        assert!((breakdown.structural - (7.0 + 10.0 / 11.0) / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_whitespace_only_is_not_short_circuited() {
        // Non-empty, so metrics run: no tokens, structural matches fully
        assert_eq!(similarity("   ", "   "), 0.3);
    }

    #[test]
    fn test_similarity_symmetric() {
        let a = "## Summary\n- Extract revenue\n- Extract income";
        let b = "Summarize this article about revenue in JSON format.";
        assert_eq!(similarity(a, b), similarity(b, a));
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.12345), 0.123);
        assert_eq!(round_score(0.9996), 1.0);
        assert_eq!(round_score(0.0), 0.0);
        assert_eq!(round_score(0.25), 0.25);
    }

    #[test]
    fn test_similarity_result_passed() {
        let result = SimilarityResult::new(0.6, 0.5);
        assert!(result.passed);
        assert_eq!(result.score, 0.6);
        assert_eq!(result.threshold, 0.5);

        let result = SimilarityResult::new(0.4, 0.5);
        assert!(!result.passed);
    }

    #[test]
    fn test_calculate_similarity() {
        let result = calculate_similarity("hello world", "hello world", 0.9);
        assert!(result.passed);
        assert_eq!(result.score, 1.0);

        let result = calculate_similarity("hello world", "", 0.0);
        assert_eq!(result.score, 0.0);
        assert!(result.passed, "threshold 0.0 accepts any score");
    }
}
