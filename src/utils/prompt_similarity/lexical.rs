/// Lexical set similarity (Jaccard index) over normalized tokens
///
/// Formula: J = |A ∩ B| / |A ∪ B|
/// where A and B are the de-duplicated token sets of each prompt.
use std::collections::HashSet;

/// Build the de-duplicated set view of a token sequence
pub fn token_set(tokens: &[String]) -> HashSet<&str> {
    tokens.iter().map(String::as_str).collect()
}

/// Calculate the Jaccard index between two token sequences
///
/// Returns 0.0 when both sequences are empty (empty union).
///
/// # Examples
///
/// ```
/// use prompt_capture::utils::prompt_similarity::lexical::jaccard_similarity;
///
/// let a = vec!["alpha".to_string(), "beta".to_string()];
/// let b = vec!["beta".to_string(), "gamma".to_string()];
/// assert!((jaccard_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn jaccard_similarity(tokens1: &[String], tokens2: &[String]) -> f64 {
    let set1 = token_set(tokens1);
    let set2 = token_set(tokens2);

    let union = set1.union(&set2).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = set1.intersection(&set2).count();
    intersection as f64 / union as f64
}
