/// Structural similarity over raw prompt formatting
///
/// Compares the *shape* of two prompts: markdown emphasis, headers, bullets,
/// JSON-like blocks, bracket spans, imperative extraction verbs and format
/// keywords. Works on raw text because normalization strips these cues.
///
/// The pattern table is tuned for English, markdown-flavored prompts. Plain
/// prose in other languages mostly scores on the length term alone.
use once_cell::sync::Lazy;
use regex::Regex;

/// One structural pattern category
#[derive(Debug)]
pub struct PatternCategory {
    pub id: &'static str,
    pub matcher: Regex,
}

impl PatternCategory {
    fn new(id: &'static str, pattern: &str) -> Self {
        Self {
            id,
            // Patterns are compile-time literals covered by `test_pattern_table_compiles`
            matcher: Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {}: {}", id, e)),
        }
    }

    /// Count non-overlapping occurrences in `text`
    pub fn count(&self, text: &str) -> usize {
        self.matcher.find_iter(text).count()
    }
}

/// Imperative verbs typical of extraction prompts (matched case-insensitively)
pub const IMPERATIVE_VERBS: &[&str] = &[
    "extract", "analyze", "analyse", "identify", "summarize", "summarise", "classify", "list",
    "return", "generate", "provide", "find", "determine", "compare", "evaluate", "describe",
];

/// Keywords that describe the expected output shape (matched case-insensitively)
pub const FORMAT_KEYWORDS: &[&str] = &[
    "format", "formatted", "structure", "structured", "template", "schema", "json", "yaml",
    "markdown", "table", "field", "fields", "output",
];

fn word_alternation(words: &[&str]) -> String {
    format!(r"(?i)\b(?:{})\b", words.join("|"))
}

/// Ordered pattern table, iterated uniformly by `structural_similarity`
pub static PATTERN_CATEGORIES: Lazy<Vec<PatternCategory>> = Lazy::new(|| {
    vec![
        PatternCategory::new("bold", r"\*\*[^*\n]+\*\*"),
        PatternCategory::new("header", r"(?m)^[ \t]*#{1,6}[ \t]+\S"),
        PatternCategory::new("bullet", r"(?m)^[ \t]*(?:[-*+•]|\d+\.)[ \t]+\S"),
        PatternCategory::new("brace_block", r"\{[^{}]*\}"),
        PatternCategory::new("bracket_span", r"\[[^\[\]]*\]"),
        PatternCategory::new("imperative_verb", &word_alternation(IMPERATIVE_VERBS)),
        PatternCategory::new("format_keyword", &word_alternation(FORMAT_KEYWORDS)),
    ]
});

/// Per-category match counts plus raw length of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSignature {
    pub counts: Vec<usize>,
    pub length: usize,
}

impl FormatSignature {
    /// Compute the signature of a raw prompt; `counts` follows `PATTERN_CATEGORIES` order
    pub fn of(text: &str) -> Self {
        Self {
            counts: PATTERN_CATEGORIES.iter().map(|c| c.count(text)).collect(),
            length: text.chars().count(),
        }
    }
}

/// Similarity of two match counts
///
/// 1.0 when both are zero (both lack the feature), otherwise
/// `1 - |m1 - m2| / max(m1, m2)`.
pub fn count_similarity(m1: usize, m2: usize) -> f64 {
    let max = m1.max(m2);
    if max == 0 {
        return 1.0;
    }
    1.0 - m1.abs_diff(m2) as f64 / max as f64
}

/// Ratio of the shorter to the longer length
///
/// Two empty prompts are treated as equally long (1.0). The aggregator never
/// reaches this case because it short-circuits on empty input.
pub fn length_ratio(len1: usize, len2: usize) -> f64 {
    let max = len1.max(len2);
    if max == 0 {
        return 1.0;
    }
    len1.min(len2) as f64 / max as f64
}

/// Calculate structural similarity between two raw prompts
///
/// Arithmetic mean of one sub-score per pattern category and the length ratio.
pub fn structural_similarity(prompt1: &str, prompt2: &str) -> f64 {
    let sig1 = FormatSignature::of(prompt1);
    let sig2 = FormatSignature::of(prompt2);

    let pattern_total: f64 = sig1
        .counts
        .iter()
        .zip(sig2.counts.iter())
        .map(|(&m1, &m2)| count_similarity(m1, m2))
        .sum();

    let terms = sig1.counts.len() + 1;
    (pattern_total + length_ratio(sig1.length, sig2.length)) / terms as f64
}
