//! Shared sample documents for integration tests.

#![allow(dead_code)]

pub const ENGLISH: &str =
    "This is a perfectly normal English sentence that should pass sanity check.";
pub const KEYBOARD_MASH: &str = "asdkj qweuioq zxcmvnq qweiuo";
pub const SYMBOLS: &str = "123 456 $$$ ####";
pub const CHINESE: &str = "这是一个有效的中文句子。";
pub const JAPANESE: &str = "これは有効な日本語の文です。";
pub const KOREAN: &str = "이것은 유효한 한국어 문장입니다.";
pub const SPANISH: &str = "Esto es un documento válido en español.";
pub const POLISH: &str = "Zarząd spółki zatwierdził roczne sprawozdanie finansowe oraz plan \
    inwestycyjny na przyszły rok, a dywidenda zostanie wypłacona akcjonariuszom w czerwcu.";
pub const SWEDISH: &str = "Styrelsen har godkänt årsredovisningen och den nya budgeten för \
    nästa år, och utdelningen kommer att betalas ut till aktieägarna i juni.";
pub const WHITESPACE: &str = "  ";
pub const SINGLE_WORD: &str = "Hello";

pub const CHAT_LOG: &str = "Internal Chat Log Transcript: Project Nightingale
UserA: The algorithm's v3.4 update is showing a clear bias in loan approvals.
We tested it on the holdback dataset. It's denying applicants from specific zip codes
at a 40% higher rate, even with identical credit scores.
UserB: Management is aware. The directive is to push the update live regardless.";

pub const MIXED_NOISE: &str = "alksdjf;laskdjf lasdkjflk jlkjzxcoivupoiu 903485-2345(*&^%)";

/// `true` when `v` carries at most two decimals.
pub fn is_two_decimal(v: f64) -> bool {
    ((v * 100.0).round() / 100.0 - v).abs() < 1e-12
}
