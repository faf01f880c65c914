/// Interchangeable prompt scoring strategies
///
/// `Weighted` is the canonical scorer. `ExactMatch` and `PositionalOverlap`
/// are kept for callers that depend on the older behavior.
///
/// The strategies disagree on blank pairs: `Weighted` scores two empty
/// prompts 0.0 while `ExactMatch` treats two blank prompts as identical
/// (1.0). `BlankPairPolicy` makes that choice explicit.
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::algorithm::{
    round_score, similarity, similarity_breakdown, SimilarityBreakdown, SimilarityResult,
};
use super::normalizer::is_blank;
use crate::config::SimilaritySettings;

/// Available scoring strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityStrategy {
    /// Jaccard + cosine + structural weighted score
    #[default]
    Weighted,
    /// 1.0 if both prompts are equal after trimming, else 0.0
    ExactMatch,
    /// Share of positions holding the same character
    PositionalOverlap,
}

impl SimilarityStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::ExactMatch => "exact_match",
            Self::PositionalOverlap => "positional_overlap",
        }
    }

    /// Score a prompt pair with this strategy's native semantics
    pub fn score(&self, prompt1: &str, prompt2: &str) -> f64 {
        match self {
            Self::Weighted => similarity(prompt1, prompt2),
            Self::ExactMatch => exact_match(prompt1, prompt2),
            Self::PositionalOverlap => positional_overlap(prompt1, prompt2),
        }
    }
}

impl fmt::Display for SimilarityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score assigned when both prompts are blank after trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankPairPolicy {
    /// Whatever the strategy itself returns
    #[default]
    Native,
    /// Always 0.0
    Zero,
    /// Always 1.0
    Identical,
}

/// Exact equality after trimming surrounding whitespace
pub fn exact_match(prompt1: &str, prompt2: &str) -> f64 {
    if prompt1.trim() == prompt2.trim() {
        1.0
    } else {
        0.0
    }
}

/// Single-pass positional character overlap
///
/// Counts positions where both prompts hold the same character and divides
/// by the longer length. Two empty prompts score 0.0.
pub fn positional_overlap(prompt1: &str, prompt2: &str) -> f64 {
    let len1 = prompt1.chars().count();
    let len2 = prompt2.chars().count();
    let longest = len1.max(len2);
    if longest == 0 {
        return 0.0;
    }

    let matches = prompt1
        .chars()
        .zip(prompt2.chars())
        .filter(|(a, b)| a == b)
        .count();

    round_score(matches as f64 / longest as f64)
}

/// Configured scorer: a strategy plus the blank-pair policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimilarityEngine {
    pub strategy: SimilarityStrategy,
    pub blank_pair_policy: BlankPairPolicy,
}

impl SimilarityEngine {
    pub fn new(strategy: SimilarityStrategy, blank_pair_policy: BlankPairPolicy) -> Self {
        Self {
            strategy,
            blank_pair_policy,
        }
    }

    pub fn from_settings(settings: &SimilaritySettings) -> Self {
        Self::new(settings.strategy, settings.blank_pair_policy)
    }

    /// Score a prompt pair
    pub fn score(&self, prompt1: &str, prompt2: &str) -> f64 {
        if is_blank(prompt1) && is_blank(prompt2) {
            match self.blank_pair_policy {
                BlankPairPolicy::Zero => return 0.0,
                BlankPairPolicy::Identical => return 1.0,
                BlankPairPolicy::Native => {}
            }
        }

        let score = self.strategy.score(prompt1, prompt2);
        debug!(strategy = %self.strategy, score, "scored prompt pair");
        score
    }

    /// Sub-scores behind `score`, when the weighted strategy produced it
    pub fn breakdown(&self, prompt1: &str, prompt2: &str) -> Option<SimilarityBreakdown> {
        if self.strategy != SimilarityStrategy::Weighted {
            return None;
        }
        let overridden = self.blank_pair_policy != BlankPairPolicy::Native;
        if overridden && is_blank(prompt1) && is_blank(prompt2) {
            return None;
        }
        similarity_breakdown(prompt1, prompt2)
    }

    /// Score a prompt pair against a threshold
    pub fn evaluate(&self, prompt1: &str, prompt2: &str, threshold: f64) -> SimilarityResult {
        SimilarityResult::new(self.score(prompt1, prompt2), threshold)
    }

    /// `evaluate` plus `breakdown`, running the weighted metrics once
    pub fn evaluate_detailed(
        &self,
        prompt1: &str,
        prompt2: &str,
        threshold: f64,
    ) -> (SimilarityResult, Option<SimilarityBreakdown>) {
        let breakdown = self.breakdown(prompt1, prompt2);
        let score = match breakdown {
            Some(parts) => parts.score,
            None => self.score(prompt1, prompt2),
        };
        (SimilarityResult::new(score, threshold), breakdown)
    }
}
