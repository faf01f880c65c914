/// Text normalization for lexical prompt comparison
///
/// Turns a raw prompt into the ordered token sequence consumed by the
/// Jaccard and cosine metrics. Formatting cues are destroyed here, which is
/// why structural matching works on the raw prompt instead.
use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Tokens this short carry no signal and are dropped
pub const MIN_TOKEN_CHARS: usize = 3;

/// Common English function words excluded from lexical comparison
///
/// Articles, conjunctions, prepositions, auxiliary verbs and generic
/// quantifiers. Negations and pronouns are kept as content. Entries shorter
/// than `MIN_TOKEN_CHARS` are listed for completeness even though the length
/// filter already removes them.
pub const STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // conjunctions
    "and", "but", "nor", "yet", "for", "so", "or", "if", "than", "then",
    // prepositions
    "with", "from", "into", "onto", "upon", "about", "above", "below", "after", "before",
    "over", "under", "between", "through", "during", "without", "within", "across",
    "against", "among", "around", "of", "to", "in", "on", "at", "by", "via", "per", "out",
    // auxiliary verbs
    "are", "was", "were", "been", "being", "have", "has", "had", "does", "did", "doing",
    "will", "would", "could", "should", "shall", "may", "might", "must", "can", "is", "be",
    "do",
    // quantifiers
    "each", "every", "some", "any", "all", "both", "few", "many", "more", "most", "other",
    "such",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Check whether a (lower-cased) token is a stop word
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Normalize a prompt into its meaningful tokens
///
/// 1. Lower-cases the text
/// 2. Replaces every character that is not a letter, digit or whitespace with a space
/// 3. Splits on whitespace (which also collapses runs and trims)
/// 4. Drops tokens shorter than `MIN_TOKEN_CHARS` and stop words
///
/// Duplicates and order are preserved.
///
/// # Examples
///
/// ```
/// use prompt_capture::utils::prompt_similarity::normalize_tokens;
///
/// let tokens = normalize_tokens("Extract the **revenue** figures, then the revenue!");
/// assert_eq!(tokens, vec!["extract", "revenue", "figures", "revenue"]);
/// ```
pub fn normalize_tokens(text: &str) -> Vec<String> {
    let stripped = strip_punctuation(&text.to_lowercase());

    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Replace every non-alphanumeric, non-whitespace character with a space
///
/// Punctuation becomes a separator, so `"end-to-end"` yields three words
/// rather than one merged token.
///
/// Letters and digits are classified with Unicode rules, not ASCII ones:
/// accented and CJK characters survive as token text. Only spaces separate
/// tokens, so an unspaced CJK sentence becomes a single token.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Check whether a prompt is empty or whitespace only
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
