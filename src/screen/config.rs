//! Configuration for the heuristic screener and the verification stages.
//!
//! All sections deserialize with defaults, so a JSON file only needs the
//! fields it overrides.

use crate::error::{Result, ScreenError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the stopword resource.
pub const DEFAULT_STOPWORDS_PATH: &str = "stopwords.json";

/// Languages the crate ships tokenizers and stopwords for.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "zh", "ar", "ru", "hi", "pt", "it", "ja", "ko",
];

/// Master configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Language detector settings.
    pub language: LanguageConfig,
    /// Garbage rule thresholds.
    pub thresholds: Thresholds,
    /// Stopword resource; `None` uses [`DEFAULT_STOPWORDS_PATH`].
    pub stopwords_path: Option<PathBuf>,
    /// Gating for the collaborator verification stages.
    pub verification: VerificationConfig,
}

impl ScreenConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ScreenError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn stopwords_path(&self) -> &Path {
        self.stopwords_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STOPWORDS_PATH))
    }

    /// Reject thresholds outside their meaningful ranges.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, v) in [
            ("short_text_min_alpha_ratio", t.short_text_min_alpha_ratio),
            ("min_stopword_ratio", t.min_stopword_ratio),
            ("min_alpha_ratio", t.min_alpha_ratio),
            ("language.min_confidence", self.language.min_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ScreenError::Config(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }
        if !(1..=10).contains(&self.verification.confidence_threshold) {
            return Err(ScreenError::Config(format!(
                "verification.confidence_threshold must be within [1, 10], got {}",
                self.verification.confidence_threshold
            )));
        }
        Ok(())
    }
}

/// Language detector settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Languages the detector may answer with. `None` or empty means any
    /// language whatlang knows.
    pub allowlist: Option<Vec<String>>,
    /// Languages an unreliable detection is narrowed to. `None` or empty
    /// takes the unreliable result as is.
    pub preferred: Option<Vec<String>>,
    /// Detections below this confidence count as failures.
    pub min_confidence: f64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            allowlist: None,
            preferred: Some(SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect()),
            min_confidence: 0.0,
        }
    }
}

/// Thresholds for the ordered garbage rule chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Trimmed texts shorter than this are garbage.
    pub min_trimmed_chars: usize,
    /// Word counts below this qualify for the short-text exemption.
    pub short_text_max_words: usize,
    /// Exemption requires an alpha ratio strictly above this.
    pub short_text_min_alpha_ratio: f64,
    /// Defined stopword ratios strictly below this are garbage.
    pub min_stopword_ratio: f64,
    /// Alpha ratios strictly below this are garbage.
    pub min_alpha_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_trimmed_chars: 5,
            short_text_max_words: 3,
            short_text_min_alpha_ratio: 0.7,
            min_stopword_ratio: 0.05,
            min_alpha_ratio: 0.5,
        }
    }
}

/// Gating applied to collaborator judgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Judgements below this confidence (1-10) never pass.
    pub confidence_threshold: u8,
    /// Trimmed documents shorter than this are rejected without a request.
    pub min_document_chars: usize,
    /// Run the heuristic screener before the collaborator stages.
    pub prefilter: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 7,
            min_document_chars: 25,
            prefilter: true,
        }
    }
}
