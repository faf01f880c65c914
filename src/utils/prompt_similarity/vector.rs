/// Vector similarity (cosine) over term-frequency vectors
///
/// Both token sequences are projected onto a shared vocabulary; each
/// component is the occurrence count of that term in the sequence.
///
/// Formula: cos = (v1 · v2) / (|v1| × |v2|)
use std::collections::{BTreeSet, HashMap};

/// Build the vocabulary (distinct tokens of either sequence) in sorted order
pub fn build_vocabulary<'a>(tokens1: &'a [String], tokens2: &'a [String]) -> Vec<&'a str> {
    tokens1
        .iter()
        .chain(tokens2.iter())
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build a term-frequency vector positionally aligned with `vocabulary`
pub fn term_frequency_vector(tokens: &[String], vocabulary: &[&str]) -> Vec<f64> {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(tokens.len());
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    vocabulary
        .iter()
        .map(|term| counts.get(term).copied().unwrap_or(0) as f64)
        .collect()
}

fn squared_magnitude(vector: &[f64]) -> f64 {
    vector.iter().map(|v| v * v).sum()
}

/// Calculate cosine similarity between two token sequences
///
/// Returns 0.0 when either vector has zero magnitude, i.e. when either
/// sequence is empty. Counts are non-negative so the result lies in [0, 1].
pub fn cosine_similarity(tokens1: &[String], tokens2: &[String]) -> f64 {
    let vocabulary = build_vocabulary(tokens1, tokens2);
    let vec1 = term_frequency_vector(tokens1, &vocabulary);
    let vec2 = term_frequency_vector(tokens2, &vocabulary);

    let sq1 = squared_magnitude(&vec1);
    let sq2 = squared_magnitude(&vec2);
    if sq1 == 0.0 || sq2 == 0.0 {
        return 0.0;
    }

    let dot: f64 = vec1.iter().zip(vec2.iter()).map(|(a, b)| a * b).sum();

    // |v1| × |v2| taken as one square root so identical vectors give exactly 1.0
    (dot / (sq1 * sq2).sqrt()).clamp(0.0, 1.0)
}
