//! Language detection for screened documents.
//!
//! Wraps whatlang behind a small engine trait. whatlang is a deterministic
//! trigram model, so identical input always yields the identical code.

use crate::error::{Result, ScreenError};
use crate::screen::config::{LanguageConfig, SUPPORTED_LANGUAGES};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use whatlang::{Detector, Lang};

/// Short language tag, ISO-639-1 where one exists (`en`, `zh`, `ja`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Normalizes to trimmed lowercase.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Family prefix match, so `zh-tw` routes like `zh`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// (iso639_3 as used by whatlang, short code exposed to callers)
const CODE_TABLE: &[(&str, &str)] = &[
    ("afr", "af"),
    ("aka", "ak"),
    ("amh", "am"),
    ("ara", "ar"),
    ("aze", "az"),
    ("bel", "be"),
    ("ben", "bn"),
    ("bul", "bg"),
    ("cat", "ca"),
    ("ces", "cs"),
    ("cmn", "zh"),
    ("dan", "da"),
    ("deu", "de"),
    ("ell", "el"),
    ("eng", "en"),
    ("epo", "eo"),
    ("est", "et"),
    ("fin", "fi"),
    ("fra", "fr"),
    ("guj", "gu"),
    ("heb", "he"),
    ("hin", "hi"),
    ("hrv", "hr"),
    ("hun", "hu"),
    ("hye", "hy"),
    ("ind", "id"),
    ("ita", "it"),
    ("jav", "jv"),
    ("jpn", "ja"),
    ("kan", "kn"),
    ("kat", "ka"),
    ("khm", "km"),
    ("kor", "ko"),
    ("lat", "la"),
    ("lav", "lv"),
    ("lit", "lt"),
    ("mal", "ml"),
    ("mar", "mr"),
    ("mkd", "mk"),
    ("mya", "my"),
    ("nep", "ne"),
    ("nld", "nl"),
    ("nob", "nb"),
    ("ori", "or"),
    ("pan", "pa"),
    ("pes", "fa"),
    ("pol", "pl"),
    ("por", "pt"),
    ("ron", "ro"),
    ("rus", "ru"),
    ("sin", "si"),
    ("slk", "sk"),
    ("slv", "sl"),
    ("sna", "sn"),
    ("spa", "es"),
    ("srp", "sr"),
    ("swe", "sv"),
    ("tam", "ta"),
    ("tel", "te"),
    ("tgl", "tl"),
    ("tha", "th"),
    ("tuk", "tk"),
    ("tur", "tr"),
    ("ukr", "uk"),
    ("urd", "ur"),
    ("uzb", "uz"),
    ("vie", "vi"),
    ("yid", "yi"),
    ("zul", "zu"),
];

/// Map a whatlang language to its short code; unmapped languages keep the
/// three-letter code.
pub fn short_code(lang: Lang) -> LanguageCode {
    let long = lang.code();
    CODE_TABLE
        .iter()
        .find(|(l, _)| *l == long)
        .map(|(_, s)| LanguageCode::new(s))
        .unwrap_or_else(|| LanguageCode::new(long))
}

/// Resolve a short or three-letter code to a whatlang language.
pub fn lang_for_code(code: &str) -> Option<Lang> {
    let code = code.trim().to_lowercase();
    let long = CODE_TABLE
        .iter()
        .find(|(_, s)| *s == code)
        .map(|(l, _)| *l)
        .unwrap_or(code.as_str());
    Lang::from_code(long)
}

/// Pluggable engine interface for language detection.
pub trait LanguageEngine: Send + Sync {
    fn name(&self) -> &'static str;
    /// `None` means detection failed; callers must not score the text.
    fn detect(&self, text: &str) -> Option<LanguageCode>;
}

/// whatlang-backed detector.
///
/// Detection runs over every language whatlang knows (or the configured
/// allowlist). A result whatlang does not call reliable is re-detected among
/// the preferred languages, so short or noisy input lands on a language with
/// curated stopwords while clear prose in any other language keeps its own code.
pub struct LanguageDetector {
    open: Detector,
    preferred: Option<Detector>,
    min_confidence: f64,
}

impl fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageDetector")
            .field("preferred", &self.preferred.is_some())
            .field("min_confidence", &self.min_confidence)
            .finish_non_exhaustive()
    }
}

/// Open detection, preferring [`SUPPORTED_LANGUAGES`] for unreliable results.
impl Default for LanguageDetector {
    fn default() -> Self {
        let langs = SUPPORTED_LANGUAGES
            .iter()
            .filter_map(|c| lang_for_code(c))
            .collect();
        Self {
            open: Detector::new(),
            preferred: Some(Detector::with_allowlist(langs)),
            min_confidence: 0.0,
        }
    }
}

fn parse_langs(codes: &[String], field: &str) -> Result<Vec<Lang>> {
    codes
        .iter()
        .map(|c| {
            lang_for_code(c)
                .ok_or_else(|| ScreenError::Config(format!("unknown language in {field}: {c}")))
        })
        .collect()
}

impl LanguageDetector {
    /// Any language whatlang knows, taken as detected.
    pub fn unrestricted() -> Self {
        Self {
            open: Detector::new(),
            preferred: None,
            min_confidence: 0.0,
        }
    }

    pub fn from_config(cfg: &LanguageConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&cfg.min_confidence) {
            return Err(ScreenError::Config(format!(
                "min_confidence must be within [0, 1], got {}",
                cfg.min_confidence
            )));
        }
        let open = match cfg.allowlist.as_deref() {
            Some(codes) if !codes.is_empty() => {
                Detector::with_allowlist(parse_langs(codes, "allowlist")?)
            }
            _ => Detector::new(),
        };
        let preferred = match cfg.preferred.as_deref() {
            Some(codes) if !codes.is_empty() => {
                Some(Detector::with_allowlist(parse_langs(codes, "preferred")?))
            }
            _ => None,
        };
        Ok(Self {
            open,
            preferred,
            min_confidence: cfg.min_confidence,
        })
    }
}

impl LanguageEngine for LanguageDetector {
    fn name(&self) -> &'static str {
        "whatlang"
    }

    fn detect(&self, text: &str) -> Option<LanguageCode> {
        let mut info = self.open.detect(text)?;
        if !info.is_reliable() {
            if let Some(narrowed) = self.preferred.as_ref().and_then(|d| d.detect(text)) {
                tracing::trace!(
                    open = info.lang().code(),
                    open_confidence = info.confidence(),
                    preferred = narrowed.lang().code(),
                    "Unreliable detection narrowed to preferred languages"
                );
                info = narrowed;
            }
        }
        if info.confidence() < self.min_confidence {
            tracing::trace!(
                lang = info.lang().code(),
                confidence = info.confidence(),
                "Detection below confidence floor"
            );
            return None;
        }
        Some(short_code(info.lang()))
    }
}

/// Detect with the default detector.
pub fn detect(text: &str) -> Option<LanguageCode> {
    LanguageDetector::default().detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english_for_long_text() {
        let text = "This is a reasonably long English sentence for detection to work properly.";
        assert_eq!(detect(text), Some(LanguageCode::new("en")));
    }

    #[test]
    fn detects_cjk_scripts() {
        let det = LanguageDetector::from_config(&LanguageConfig::default()).unwrap();
        assert_eq!(det.detect("これは有効な日本語の文です。").unwrap().as_str(), "ja");
        assert_eq!(det.detect("이것은 유효한 한국어 문장입니다.").unwrap().as_str(), "ko");
        assert_eq!(det.detect("这是一个有效的中文句子。").unwrap().as_str(), "zh");
    }

    #[test]
    fn clear_prose_outside_preferred_set_keeps_its_code() {
        let polish = "Zarząd spółki zatwierdził roczne sprawozdanie finansowe oraz plan \
                      inwestycyjny na przyszły rok, a dywidenda zostanie wypłacona akcjonariuszom w czerwcu.";
        assert_eq!(detect(polish), Some(LanguageCode::new("pl")));

        let dutch = "Dit is een gewone zin in het Nederlands, geschreven voor de test van de detector.";
        assert_eq!(
            LanguageDetector::unrestricted().detect(dutch),
            Some(LanguageCode::new("nl"))
        );
    }

    #[test]
    fn unreliable_detection_narrows_to_preferred_languages() {
        let code = detect("asdkj qweuioq zxcmvnq qweiuo").unwrap();
        assert!(SUPPORTED_LANGUAGES.contains(&code.as_str()), "{code}");
    }

    #[test]
    fn empty_and_symbolic_input_fail() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("   "), None);
        assert_eq!(detect("123 456 $$$ ####"), None);
    }

    #[test]
    fn deterministic_across_calls() {
        let text = "Ceci est un document parfaitement valide rédigé en français.";
        let det = LanguageDetector::from_config(&LanguageConfig::default()).unwrap();
        let first = det.detect(text);
        for _ in 0..5 {
            assert_eq!(det.detect(text), first);
        }
    }

    #[test]
    fn code_mapping_round_trips_through_whatlang() {
        assert_eq!(lang_for_code("zh"), Some(Lang::Cmn));
        assert_eq!(lang_for_code("EN"), Some(Lang::Eng));
        assert_eq!(lang_for_code("deu"), Some(Lang::Deu));
        assert_eq!(short_code(Lang::Cmn).as_str(), "zh");
        assert_eq!(lang_for_code("xx"), None);
    }

    #[test]
    fn rejects_unknown_allowlist_entries() {
        let cfg = LanguageConfig {
            allowlist: Some(vec!["en".into(), "klingon".into()]),
            ..LanguageConfig::default()
        };
        assert!(matches!(
            LanguageDetector::from_config(&cfg),
            Err(ScreenError::Config(_))
        ));
    }

    #[test]
    fn confidence_floor_turns_weak_detection_into_failure() {
        let cfg = LanguageConfig {
            allowlist: None,
            preferred: None,
            min_confidence: 1.0,
        };
        let det = LanguageDetector::from_config(&cfg).unwrap();
        assert_eq!(det.detect("qwe rty"), None);
    }

    #[test]
    fn language_code_prefix_and_normalization() {
        let code = LanguageCode::new(" ZH-TW ");
        assert_eq!(code.as_str(), "zh-tw");
        assert!(code.has_prefix("zh"));
        assert!(!code.has_prefix("ja"));
    }
}
