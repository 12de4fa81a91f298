//! Language-aware tokenization.
//!
//! Each script family maps to exactly one strategy. Tokens are raw surface
//! strings, punctuation included; whitespace never forms a token.

use crate::screen::language::LanguageCode;
use jieba_rs::Jieba;
use lindera::dictionary::load_dictionary;
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

// Dictionary load is the expensive part; do it once per process.
static JIEBA: Lazy<Jieba> = Lazy::new(Jieba::new);

const IPADIC: &str = "embedded://ipadic";
const KO_DIC: &str = "embedded://ko-dic";

static JA_SEGMENTER: Lazy<Option<Segmenter>> = Lazy::new(|| load_segmenter(IPADIC));
static KO_SEGMENTER: Lazy<Option<Segmenter>> = Lazy::new(|| load_segmenter(KO_DIC));

fn load_segmenter(uri: &str) -> Option<Segmenter> {
    match load_dictionary(uri) {
        Ok(dictionary) => Some(Segmenter::new(Mode::Normal, dictionary, None)),
        Err(e) => {
            warn!(
                dictionary = uri,
                error = %e,
                "Morphological dictionary unavailable; falling back to generic tokenizer"
            );
            None
        }
    }
}

/// Tokenization strategy family, chosen by language-code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptFamily {
    /// Dictionary segmentation (jieba).
    Chinese,
    /// Morphological segmentation (lindera, ipadic).
    Japanese,
    /// Morphological analysis (lindera, ko-dic).
    Korean,
    /// Unicode word boundaries (UAX #29).
    Generic,
}

impl ScriptFamily {
    pub fn for_language(lang: &LanguageCode) -> Self {
        if lang.has_prefix("zh") {
            ScriptFamily::Chinese
        } else if lang.has_prefix("ja") {
            ScriptFamily::Japanese
        } else if lang.has_prefix("ko") {
            ScriptFamily::Korean
        } else {
            ScriptFamily::Generic
        }
    }

    pub fn tokenize(self, text: &str) -> Vec<String> {
        match self {
            ScriptFamily::Chinese => tokenize_chinese(text),
            ScriptFamily::Japanese => tokenize_japanese(text),
            ScriptFamily::Korean => tokenize_korean(text),
            ScriptFamily::Generic => tokenize_generic(text),
        }
    }
}

/// Tokenize `text` with the strategy for `lang`.
pub fn tokenize(text: &str, lang: &LanguageCode) -> Vec<String> {
    ScriptFamily::for_language(lang).tokenize(text)
}

/// Word-boundary tokens with whitespace dropped.
pub fn tokenize_generic(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub fn tokenize_chinese(text: &str) -> Vec<String> {
    JIEBA
        .cut(text, true)
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Morpheme surfaces from a lindera segmenter. A missing dictionary or a
/// segmentation error degrades to [`tokenize_generic`].
fn tokenize_morphemes(
    segmenter: &Lazy<Option<Segmenter>>,
    dictionary: &str,
    text: &str,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let Some(segmenter) = &**segmenter else {
        return tokenize_generic(text);
    };
    match segmenter.segment(Cow::Borrowed(text)) {
        Ok(tokens) => tokens
            .into_iter()
            .map(|t| t.surface.into_owned())
            .filter(|t| !t.trim().is_empty())
            .collect(),
        Err(e) => {
            warn!(dictionary, error = %e, "Segmentation failed; using generic tokenizer");
            tokenize_generic(text)
        }
    }
}

/// Japanese morphemes (ipadic).
pub fn tokenize_japanese(text: &str) -> Vec<String> {
    tokenize_morphemes(&JA_SEGMENTER, IPADIC, text)
}

/// Korean morphemes (ko-dic); josa and endings come out as their own tokens.
pub fn tokenize_korean(text: &str) -> Vec<String> {
    tokenize_morphemes(&KO_SEGMENTER, KO_DIC, text)
}
