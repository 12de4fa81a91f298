//! Per-language stopword sets.
//!
//! The table is built once (from a JSON resource or the built-in lists) and
//! then shared read-only, typically behind an `Arc`.

use crate::error::{Result, ScreenError};
use crate::screen::language::LanguageCode;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const EN: &[&str] = &[
    "the", "and", "is", "in", "it", "to", "of", "a", "that", "for", "on", "with", "as", "was",
    "are", "at", "by", "this", "from", "or",
];
const ES: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "se", "del", "las", "por", "un", "para",
    "con", "no", "una", "su", "al", "lo",
];
const FR: &[&str] = &[
    "de", "la", "et", "le", "à", "les", "des", "en", "du", "un", "que", "pour", "dans", "par",
    "est", "sur", "qui", "se", "au",
];
const DE: &[&str] = &[
    "und", "der", "die", "das", "in", "zu", "den", "von", "mit", "nicht", "ist", "des", "dem",
    "ein", "eine", "als", "auch", "auf",
];
const ZH: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
    "很", "到", "他", "她",
];
const AR: &[&str] = &[
    "في", "من", "على", "و", "إلى", "عن", "أن", "مع", "كان", "ما", "لا", "هذا", "هذه", "الذي",
    "ذلك", "كل", "كما", "هو",
];
const RU: &[&str] = &[
    "и", "в", "не", "на", "что", "он", "с", "как", "а", "его", "по", "но", "за", "из", "к",
    "она", "они", "ее",
];
const HI: &[&str] = &[
    "और", "के", "है", "से", "में", "का", "कि", "यह", "को", "पर", "वह", "की", "जो", "कर",
    "हुआ", "वे", "इस",
];
const PT: &[&str] = &[
    "de", "que", "e", "o", "da", "em", "um", "para", "com", "não", "uma", "os", "no", "se",
    "na", "por", "mais", "as", "dos",
];
const IT: &[&str] = &[
    "di", "e", "che", "in", "a", "per", "è", "con", "non", "una", "il", "un", "ma", "le", "si",
    "dei", "della", "più", "come",
];
// Particles and copulas split off by the morpheme tokenizers.
const JA: &[&str] = &[
    "は", "が", "を", "に", "で", "と", "も", "の", "へ", "や", "か", "な", "だ", "です", "ます",
    "から", "まで", "より", "これ", "それ", "この", "その", "こと",
];
const KO: &[&str] = &[
    "은", "는", "이", "가", "을", "를", "에", "의", "와", "과", "도", "로", "으로", "에서",
    "에게", "까지", "부터", "입니다", "이다", "그", "이것", "것", "수", "및",
];

const BUILTIN: &[(&str, &[&str])] = &[
    ("en", EN),
    ("es", ES),
    ("fr", FR),
    ("de", DE),
    ("zh", ZH),
    ("ar", AR),
    ("ru", RU),
    ("hi", HI),
    ("pt", PT),
    ("it", IT),
    ("ja", JA),
    ("ko", KO),
];

/// Where a [`StopwordTable`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopwordSource {
    /// Parsed from the configured resource.
    Resource { path: PathBuf },
    /// Built-in lists substituted because the resource was unusable.
    BuiltinDefault { reason: String },
}

impl StopwordSource {
    pub fn is_default(&self) -> bool {
        matches!(self, StopwordSource::BuiltinDefault { .. })
    }
}

impl fmt::Display for StopwordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopwordSource::Resource { path } => write!(f, "resource {}", path.display()),
            StopwordSource::BuiltinDefault { reason } => write!(f, "built-in default ({reason})"),
        }
    }
}

/// Read-only mapping from language code to lowercase stopwords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopwordTable {
    sets: HashMap<LanguageCode, HashSet<String>>,
}

impl StopwordTable {
    /// Empty table; every stopword ratio becomes undefined.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The curated lists compiled into the crate.
    pub fn builtin() -> Self {
        Self {
            sets: BUILTIN
                .iter()
                .map(|(lang, words)| {
                    (
                        LanguageCode::new(lang),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Build from arbitrary lists; words are case-folded and keys validated.
    pub fn from_lists<I, K, W, S>(lists: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, W)>,
        K: AsRef<str>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sets: HashMap<LanguageCode, HashSet<String>> = HashMap::new();
        for (lang, words) in lists {
            let code = LanguageCode::new(lang.as_ref());
            if !is_language_key(code.as_str()) {
                return Err(ScreenError::InvalidStopwords(format!(
                    "invalid language code {:?}",
                    lang.as_ref()
                )));
            }
            sets.entry(code).or_default().extend(
                words
                    .into_iter()
                    .map(|w| w.as_ref().trim().to_lowercase())
                    .filter(|w| !w.is_empty()),
            );
        }
        Ok(Self { sets })
    }

    /// Parse a JSON object of `{"lang": ["word", ...]}`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::parse(s, Path::new("<inline>"))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ScreenError::StopwordsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self> {
        let lists: BTreeMap<String, Vec<String>> =
            serde_json::from_str(raw).map_err(|source| ScreenError::StopwordsParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_lists(lists)
    }

    /// Load the resource, substituting the built-in lists when it is missing
    /// or malformed. The substitution is logged and reported, never silent.
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> (Self, StopwordSource) {
        let path = path.as_ref();
        match Self::from_json_file(path) {
            Ok(table) => {
                info!(
                    path = %path.display(),
                    languages = table.len(),
                    "Loaded stopword resource"
                );
                (
                    table,
                    StopwordSource::Resource {
                        path: path.to_path_buf(),
                    },
                )
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Stopword resource unusable; using built-in stopword lists"
                );
                (
                    Self::builtin(),
                    StopwordSource::BuiltinDefault {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    /// Stopword set for an exact language code.
    pub fn get(&self, lang: &LanguageCode) -> Option<&HashSet<String>> {
        self.sets.get(lang.as_str())
    }

    pub fn contains_language(&self, lang: &str) -> bool {
        self.sets.contains_key(lang)
    }

    /// Whether `word` (case-folded) is a stopword of `lang`.
    pub fn is_stopword(&self, lang: &LanguageCode, word: &str) -> bool {
        self.get(lang)
            .is_some_and(|set| set.contains(&word.to_lowercase()))
    }

    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.sets.keys()
    }

    /// Number of languages
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// `xx`, `xxx` or `xx-region`.
fn is_language_key(code: &str) -> bool {
    let mut parts = code.splitn(2, '-');
    let base = parts.next().unwrap_or_default();
    let base_ok = (2..=3).contains(&base.len()) && base.chars().all(|c| c.is_ascii_lowercase());
    let region_ok = parts
        .next()
        .map_or(true, |r| !r.is_empty() && r.chars().all(|c| c.is_ascii_alphanumeric()));
    base_ok && region_ok
}
