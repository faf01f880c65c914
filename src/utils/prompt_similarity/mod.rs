/// Prompt similarity scoring
///
/// Deterministic, stateless scoring of two free-text prompts into a single
/// value in [0, 1], used to drop near-identical prompts before they are
/// captured as training data.
///
/// # Architecture
///
/// - `normalizer`: prompt → ordered meaningful tokens
/// - `lexical`: Jaccard index over token sets
/// - `vector`: cosine similarity over term-frequency vectors
/// - `structural`: formatting-pattern agreement on raw prompts
/// - `algorithm`: weighted aggregation of the three metrics
/// - `strategy`: canonical and legacy scorers behind one engine
/// - `matcher`: near-duplicate checks over caller-supplied batches
///
/// # Usage
///
/// ```rust
/// use prompt_capture::utils::prompt_similarity::{similarity, similarity_breakdown};
///
/// let score = similarity("## Task\nExtract revenue", "## Task\nExtract income");
/// assert!(score > 0.0 && score < 1.0);
///
/// let parts = similarity_breakdown("## Task\nExtract revenue", "## Task\nExtract income").unwrap();
/// assert_eq!(parts.score, score);
/// ```
pub mod algorithm;
pub mod lexical;
pub mod matcher;
pub mod normalizer;
pub mod strategy;
pub mod structural;
pub mod vector;

// Re-export commonly used items
pub use algorithm::{
    calculate_similarity, round_score, similarity, similarity_breakdown, similarity_opt,
    SimilarityBreakdown, SimilarityResult,
};
pub use lexical::jaccard_similarity;
pub use matcher::{
    check_duplicate, find_duplicate_groups, is_unique, BestMatch, DuplicateGroup, MatchResult,
};
pub use normalizer::{normalize_tokens, STOP_WORDS};
pub use strategy::{BlankPairPolicy, SimilarityEngine, SimilarityStrategy};
pub use structural::{structural_similarity, FormatSignature, PATTERN_CATEGORIES};
pub use vector::cosine_similarity;

/// Default score at or above which two prompts count as near duplicates
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.9;
