//! Lexical statistics feeding the garbage rules.

use crate::screen::language::LanguageCode;
use crate::screen::stopwords::StopwordTable;
use serde::{Deserialize, Serialize};

/// Statistics for one detected-language document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub language: LanguageCode,
    /// Count of purely alphabetic tokens.
    pub words: usize,
    /// Share of words found in the language's stopword set. `None` when the
    /// language has no set or there are no words; never collapsed to 0.
    pub stopword_ratio: Option<f64>,
    /// Mean word length in characters, 2 decimals.
    pub avg_word_len: f64,
    /// Alphabetic characters over all characters, 2 decimals.
    pub alpha_ratio: f64,
}

/// Round half away from zero to 2 decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Non-empty and every char alphabetic.
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Fraction of characters in `text` that are alphabetic, 2 decimals.
pub fn alpha_ratio(text: &str) -> f64 {
    let (alpha, total) = text.chars().fold((0usize, 0usize), |(a, t), c| {
        (a + usize::from(c.is_alphabetic()), t + 1)
    });
    round2(alpha as f64 / total.max(1) as f64)
}

/// Derive statistics from the raw text and its tokens.
pub fn compute_stats<S: AsRef<str>>(
    text: &str,
    lang: &LanguageCode,
    tokens: &[S],
    stopwords: &StopwordTable,
) -> DocumentStats {
    let words: Vec<&str> = tokens
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| is_word(t))
        .collect();
    let num_words = words.len();

    let avg_word_len = if num_words == 0 {
        0.0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / num_words as f64
    };

    let stopword_ratio = match stopwords.get(lang) {
        Some(set) if num_words > 0 => {
            let hits = words
                .iter()
                .filter(|w| set.contains(&w.to_lowercase()))
                .count();
            Some(hits as f64 / num_words as f64)
        }
        _ => None,
    };

    DocumentStats {
        language: lang.clone(),
        words: num_words,
        stopword_ratio,
        avg_word_len: round2(avg_word_len),
        alpha_ratio: alpha_ratio(text),
    }
}
