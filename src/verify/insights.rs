//! Normalization of metadata-enrichment replies (tags, one-line insight,
//! risk level).

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_TAGS: usize = 6;
pub const DEFAULT_INSIGHT: &str = "Community-curated leak awaiting deeper analysis.";
pub const UNAVAILABLE_INSIGHT: &str = "Unable to generate automated insight at this time.";
pub const UNKNOWN_RISK: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakInsights {
    pub tags: Vec<String>,
    pub insight: String,
    pub risk: String,
}

impl LeakInsights {
    /// Record used when the enrichment service gave no usable reply.
    pub fn unavailable() -> Self {
        Self {
            tags: Vec::new(),
            insight: UNAVAILABLE_INSIGHT.to_string(),
            risk: UNKNOWN_RISK.to_string(),
        }
    }

    /// Normalize a raw JSON reply. Anything other than a JSON object counts
    /// as no reply.
    pub fn from_reply(raw: Option<&str>) -> Self {
        match raw.and_then(|r| serde_json::from_str::<Value>(r.trim()).ok()) {
            Some(v) if v.is_object() => Self::from_value(&v),
            _ => Self::unavailable(),
        }
    }

    pub fn from_value(v: &Value) -> Self {
        let tags: Vec<String> = match v.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(clean_tag)
                .take(MAX_TAGS)
                .collect(),
            Some(Value::String(s)) => s.split(',').filter_map(clean_tag).take(MAX_TAGS).collect(),
            _ => Vec::new(),
        };

        let insight = v
            .get("insight")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_INSIGHT)
            .to_string();

        let risk = match v.get("risk") {
            Some(Value::String(s)) => capitalize(s.trim()),
            _ => UNKNOWN_RISK.to_string(),
        };

        Self {
            tags,
            insight,
            risk,
        }
    }
}

fn clean_tag(tag: &str) -> Option<String> {
    let t = tag.trim();
    (!t.is_empty()).then(|| t.replace(' ', "-"))
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
