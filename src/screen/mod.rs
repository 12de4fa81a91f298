//! Heuristic garbage-text screening.
//!
//! Pipeline: detect language -> tokenize by script family -> lexical
//! statistics -> ordered rule chain. Every input resolves to a [`Verdict`];
//! nothing on this path returns an error.

pub mod classify;
pub mod config;
pub mod language;
pub mod stats;
pub mod stopwords;
pub mod tokenize;

pub use classify::{classify, evaluate, GarbageRule};
pub use config::{ScreenConfig, Thresholds};
pub use language::{LanguageCode, LanguageDetector, LanguageEngine};
pub use stats::{compute_stats, DocumentStats};
pub use stopwords::{StopwordSource, StopwordTable};
pub use tokenize::{tokenize, ScriptFamily};

use crate::error::Result;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Why a verdict came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum VerdictReason {
    /// Language could not be determined; no statistics were computed.
    LanguageUndetected,
    /// Decided by a rule of the chain.
    Rule(GarbageRule),
}

/// Outcome of screening one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub garbage: bool,
    /// Detected language, `None` on detection failure.
    pub language: Option<LanguageCode>,
    /// Present whenever a language was detected.
    pub stats: Option<DocumentStats>,
    pub reason: VerdictReason,
}

impl Verdict {
    fn undetected() -> Self {
        Self {
            garbage: true,
            language: None,
            stats: None,
            reason: VerdictReason::LanguageUndetected,
        }
    }
}

/// Scoring context: detector, stopword table and thresholds, all read-only.
///
/// Cheap to clone; clones share the same table and detector.
#[derive(Clone)]
pub struct Screener {
    detector: Arc<dyn LanguageEngine>,
    stopwords: Arc<StopwordTable>,
    thresholds: Thresholds,
}

impl std::fmt::Debug for Screener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screener")
            .field("detector", &self.detector.name())
            .field("stopword_languages", &self.stopwords.len())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl Default for Screener {
    fn default() -> Self {
        Self {
            detector: Arc::new(LanguageDetector::default()),
            stopwords: Arc::new(StopwordTable::builtin()),
            thresholds: Thresholds::default(),
        }
    }
}

impl Screener {
    pub fn new(
        detector: Arc<dyn LanguageEngine>,
        stopwords: Arc<StopwordTable>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            detector,
            stopwords,
            thresholds,
        }
    }

    /// Build from config, loading the stopword resource (or the built-in
    /// fallback). The returned source tells the caller which one was used.
    pub fn from_config(cfg: &ScreenConfig) -> Result<(Self, StopwordSource)> {
        cfg.validate()?;
        let detector = LanguageDetector::from_config(&cfg.language)?;
        let (table, source) = StopwordTable::load_or_builtin(cfg.stopwords_path());
        Ok((
            Self::new(Arc::new(detector), Arc::new(table), cfg.thresholds.clone()),
            source,
        ))
    }

    /// A screener using `stopwords` in place of the current table. The
    /// original screener and any in-flight calls keep the old table.
    pub fn with_stopwords(&self, stopwords: Arc<StopwordTable>) -> Self {
        Self {
            stopwords,
            ..self.clone()
        }
    }

    pub fn stopwords(&self) -> &StopwordTable {
        &self.stopwords
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn detect_language(&self, text: &str) -> Option<LanguageCode> {
        self.detector.detect(text)
    }

    /// Screen one document.
    pub fn sanity_check(&self, text: &str) -> Verdict {
        let Some(lang) = self.detector.detect(text) else {
            debug!(
                detector = self.detector.name(),
                chars = text.chars().count(),
                "Language undetected; flagged as garbage"
            );
            return Verdict::undetected();
        };

        let tokens = tokenize(text, &lang);
        let stats = compute_stats(text, &lang, &tokens, &self.stopwords);
        let rule = evaluate(text, &stats, &self.thresholds);

        debug!(
            language = %lang,
            tokens = tokens.len(),
            words = stats.words,
            stopword_ratio = ?stats.stopword_ratio,
            alpha_ratio = stats.alpha_ratio,
            rule = %rule,
            "Screened document"
        );

        Verdict {
            garbage: rule.is_garbage(),
            language: Some(lang),
            stats: Some(stats),
            reason: VerdictReason::Rule(rule),
        }
    }

    /// Screen many documents in parallel; output order matches input.
    pub fn sanity_check_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Verdict> {
        texts
            .par_iter()
            .map(|t| self.sanity_check(t.as_ref()))
            .collect()
    }
}

static DEFAULT_SCREENER: Lazy<Screener> = Lazy::new(|| {
    let cfg = ScreenConfig::default();
    match Screener::from_config(&cfg) {
        Ok((screener, _)) => screener,
        Err(e) => {
            tracing::warn!(error = %e, "Default screener config rejected; using built-ins");
            Screener::default()
        }
    }
});

/// Screen with a process-wide screener built from the default config.
pub fn sanity_check(text: &str) -> Verdict {
    DEFAULT_SCREENER.sanity_check(text)
}
