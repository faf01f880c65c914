/// Near-duplicate detection over caller-supplied prompts
///
/// Intended as the pre-write filter of a capture pipeline: before a prompt
/// is persisted, compare it with the prompts already in the batch and skip
/// it if one is too similar.
///
/// # Workflow
///
/// 1. Score the candidate against every supplied prompt with the engine
/// 2. Track the highest score (first index wins ties)
/// 3. Report a duplicate if the best score reaches the threshold
///
/// Nothing is retained between calls.
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::strategy::SimilarityEngine;

/// Result of checking one candidate against existing prompts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the best match reached the threshold
    pub duplicate: bool,
    /// The highest scoring existing prompt, if any were supplied
    pub best_match: Option<BestMatch>,
    /// Score against every existing prompt, in input order
    pub all_scores: Vec<f64>,
}

/// Highest scoring existing prompt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub index: usize,
    pub score: f64,
}

/// Prompts that are near duplicates of the group head (first index)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub indices: Vec<usize>,
    /// Mean score of the members against the head
    pub similarity: f64,
}

/// Check whether `candidate` is a near duplicate of any prompt in `existing`
///
/// # Examples
///
/// ```
/// use prompt_capture::utils::prompt_similarity::{check_duplicate, SimilarityEngine};
///
/// let engine = SimilarityEngine::default();
/// let result = check_duplicate(&engine, "Extract revenue", &["Extract revenue", "Hi"], 0.9);
/// assert!(result.duplicate);
/// assert_eq!(result.best_match.unwrap().index, 0);
/// ```
pub fn check_duplicate<S: AsRef<str>>(
    engine: &SimilarityEngine,
    candidate: &str,
    existing: &[S],
    threshold: f64,
) -> MatchResult {
    let all_scores: Vec<f64> = existing
        .iter()
        .map(|prompt| engine.score(candidate, prompt.as_ref()))
        .collect();

    let mut best_match: Option<BestMatch> = None;
    for (index, &score) in all_scores.iter().enumerate() {
        if best_match.map_or(true, |best| score > best.score) {
            best_match = Some(BestMatch { index, score });
        }
    }

    let duplicate = best_match.map_or(false, |best| best.score >= threshold);

    debug!(
        compared = all_scores.len(),
        best_score = best_match.map(|b| b.score),
        duplicate,
        "checked candidate prompt"
    );

    MatchResult {
        duplicate,
        best_match,
        all_scores,
    }
}

/// Check a candidate and return `true` if it should be kept (not a duplicate)
pub fn is_unique<S: AsRef<str>>(
    engine: &SimilarityEngine,
    candidate: &str,
    existing: &[S],
    threshold: f64,
) -> bool {
    !check_duplicate(engine, candidate, existing, threshold).duplicate
}

/// Group near-duplicate prompts within one batch
///
/// Greedy single pass: each prompt not yet grouped becomes a head and
/// collects every later ungrouped prompt scoring at or above `threshold`
/// against it. Only groups of two or more are returned.
pub fn find_duplicate_groups<S: AsRef<str>>(
    engine: &SimilarityEngine,
    prompts: &[S],
    threshold: f64,
) -> Vec<DuplicateGroup> {
    let mut grouped = vec![false; prompts.len()];
    let mut groups = Vec::new();

    for head in 0..prompts.len() {
        if grouped[head] {
            continue;
        }

        let mut indices = vec![head];
        let mut total = 0.0;

        for other in (head + 1)..prompts.len() {
            if grouped[other] {
                continue;
            }
            let score = engine.score(prompts[head].as_ref(), prompts[other].as_ref());
            if score >= threshold {
                indices.push(other);
                total += score;
            }
        }

        if indices.len() > 1 {
            for &index in &indices {
                grouped[index] = true;
            }
            let members = (indices.len() - 1) as f64;
            groups.push(DuplicateGroup {
                indices,
                similarity: total / members,
            });
        }
    }

    debug!(
        prompts = prompts.len(),
        groups = groups.len(),
        "grouped near-duplicate prompts"
    );

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "## Report\n- Extract revenue figures\n- Extract net income";
    const REPORT_AGAIN: &str = "## Report\n- Extract revenue figures\n- Extract net income";
    const ARTICLE: &str = "Read the news article and name every company mentioned.";

    #[test]
    fn test_check_duplicate_exact() {
        let engine = SimilarityEngine::default();
        let result = check_duplicate(&engine, REPORT, &[ARTICLE, REPORT_AGAIN], 0.9);

        assert!(result.duplicate);
        let best = result.best_match.unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.score, 1.0);
        assert_eq!(result.all_scores.len(), 2);
        assert!(result.all_scores[0] < 0.9);
    }

    #[test]
    fn test_check_duplicate_below_threshold() {
        let engine = SimilarityEngine::default();
        let result = check_duplicate(&engine, REPORT, &[ARTICLE], 0.9);

        assert!(!result.duplicate);
        assert_eq!(result.best_match.unwrap().index, 0);
    }

    #[test]
    fn test_check_duplicate_no_existing() {
        let engine = SimilarityEngine::default();
        let existing: [&str; 0] = [];
        let result = check_duplicate(&engine, REPORT, &existing, 0.0);

        assert!(!result.duplicate);
        assert!(result.best_match.is_none());
        assert!(result.all_scores.is_empty());
    }

    #[test]
    fn test_check_duplicate_first_index_wins_ties() {
        let engine = SimilarityEngine::default();
        let result = check_duplicate(&engine, REPORT, &[REPORT, REPORT_AGAIN], 0.5);
        assert_eq!(result.best_match.unwrap().index, 0);
    }

    #[test]
    fn test_check_duplicate_accepts_owned_strings() {
        let engine = SimilarityEngine::default();
        let existing = vec![REPORT.to_string()];
        assert!(check_duplicate(&engine, REPORT, existing.as_slice(), 1.0).duplicate);
    }

    #[test]
    fn test_is_unique() {
        let engine = SimilarityEngine::default();
        assert!(!is_unique(&engine, REPORT, &[REPORT_AGAIN], 0.9));
        assert!(is_unique(&engine, ARTICLE, &[REPORT], 0.9));
    }

    #[test]
    fn test_empty_candidate_is_never_duplicate_with_weighted() {
        let engine = SimilarityEngine::default();
        assert!(!check_duplicate(&engine, "", &[""], 0.5).duplicate);
    }

    #[test]
    fn test_find_duplicate_groups() {
        let engine = SimilarityEngine::default();
        let prompts = [REPORT, ARTICLE, REPORT_AGAIN, ARTICLE, "Unrelated prompt text"];
        let groups = find_duplicate_groups(&engine, &prompts, 0.9);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].indices, vec![0, 2]);
        assert_eq!(groups[0].similarity, 1.0);
        assert_eq!(groups[1].indices, vec![1, 3]);
    }

    #[test]
    fn test_find_duplicate_groups_none() {
        let engine = SimilarityEngine::default();
        let prompts = [REPORT, ARTICLE];
        assert!(find_duplicate_groups(&engine, &prompts, 0.9).is_empty());

        let single = [REPORT];
        assert!(find_duplicate_groups(&engine, &single, 0.0).is_empty());
    }
}
