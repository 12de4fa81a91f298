//! Ordered garbage rule chain.
//!
//! Rules are evaluated in declaration order and the first one that decides
//! wins. The short-text exemption sits ahead of the stopword rule so a
//! handful of words is never judged on stopword density.

use crate::screen::config::Thresholds;
use crate::screen::stats::DocumentStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarbageRule {
    /// Trimmed text under the minimum length.
    TooShort,
    /// Few words but dense letters; accepted.
    ShortDenseExemption,
    /// Stopword ratio defined and too low.
    StopwordScarcity,
    /// Too many digits or symbols.
    LowAlphaDensity,
    /// No rule objected; accepted.
    Passed,
}

impl GarbageRule {
    pub fn is_garbage(self) -> bool {
        matches!(
            self,
            GarbageRule::TooShort | GarbageRule::StopwordScarcity | GarbageRule::LowAlphaDensity
        )
    }
}

impl fmt::Display for GarbageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GarbageRule::TooShort => "too_short",
            GarbageRule::ShortDenseExemption => "short_dense_exemption",
            GarbageRule::StopwordScarcity => "stopword_scarcity",
            GarbageRule::LowAlphaDensity => "low_alpha_density",
            GarbageRule::Passed => "passed",
        };
        f.write_str(s)
    }
}

/// Run the chain and report which rule decided.
pub fn evaluate(raw_text: &str, stats: &DocumentStats, t: &Thresholds) -> GarbageRule {
    if raw_text.trim().chars().count() < t.min_trimmed_chars {
        return GarbageRule::TooShort;
    }
    if stats.words < t.short_text_max_words && stats.alpha_ratio > t.short_text_min_alpha_ratio {
        return GarbageRule::ShortDenseExemption;
    }
    if stats
        .stopword_ratio
        .is_some_and(|r| r < t.min_stopword_ratio)
    {
        return GarbageRule::StopwordScarcity;
    }
    if stats.alpha_ratio < t.min_alpha_ratio {
        return GarbageRule::LowAlphaDensity;
    }
    GarbageRule::Passed
}

/// `true` when the text is garbage under the default thresholds.
pub fn classify(raw_text: &str, stats: &DocumentStats) -> bool {
    evaluate(raw_text, stats, &Thresholds::default()).is_garbage()
}
