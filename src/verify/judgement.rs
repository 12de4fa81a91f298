//! Parsing and gating of collaborator judgements.

use crate::error::{Result, ScreenError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which question a stage answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Is the text structurally coherent language? Reply key `is_garbage`.
    Coherency,
    /// Does the content resemble a real-world document? Reply key `is_plausible`.
    Plausibility,
}

impl StageKind {
    /// The boolean field this stage's reply must carry.
    pub fn verdict_key(self) -> &'static str {
        match self {
            StageKind::Coherency => "is_garbage",
            StageKind::Plausibility => "is_plausible",
        }
    }

    fn too_short_reason(self) -> &'static str {
        match self {
            StageKind::Coherency => "Input is empty or too short to be a valid document.",
            StageKind::Plausibility => "Input is too short to assess for plausibility.",
        }
    }

    /// Appended to the reason of a judgement rejected for low confidence.
    pub fn low_confidence_suffix(self) -> &'static str {
        match self {
            StageKind::Coherency => " (Rejected due to low confidence score.)",
            StageKind::Plausibility => " (Rejected due to low confidence.)",
        }
    }

    fn error_reason(self) -> &'static str {
        match self {
            StageKind::Coherency => "Failed to get a valid response from the verification model.",
            StageKind::Plausibility => {
                "Failed to get a valid response from the plausibility model."
            }
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Coherency => f.write_str("coherency"),
            StageKind::Plausibility => f.write_str("plausibility"),
        }
    }
}

/// A gated judgement from one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    pub stage: StageKind,
    /// The collaborator's answer, normalized so `true` is the favourable
    /// outcome: coherent for coherency, plausible for plausibility.
    pub acceptable: bool,
    pub reason: String,
    /// 1-10 from the collaborator; 0 marks an error judgement.
    pub confidence: u8,
    /// Plausibility replies classify the document ("Memo", "Fiction", ...).
    pub document_type: Option<String>,
    /// Outcome after the confidence threshold.
    pub passed: bool,
}

impl Judgement {
    /// Rejection for a missing or malformed reply.
    pub fn error(stage: StageKind) -> Self {
        Self {
            stage,
            acceptable: false,
            reason: stage.error_reason().to_string(),
            confidence: 0,
            document_type: (stage == StageKind::Plausibility).then(|| "Error".to_string()),
            passed: false,
        }
    }

    /// Rejection for input too short to send.
    pub fn too_short(stage: StageKind) -> Self {
        Self {
            stage,
            acceptable: false,
            reason: stage.too_short_reason().to_string(),
            confidence: 10,
            document_type: (stage == StageKind::Plausibility).then(|| "Error".to_string()),
            passed: false,
        }
    }

    /// Parse a raw JSON reply and apply the confidence gate.
    pub fn from_reply(stage: StageKind, raw: &str, confidence_threshold: u8) -> Result<Self> {
        let reply = parse_reply(stage, raw)?;
        Ok(reply.gate(confidence_threshold))
    }

    /// Like [`Judgement::from_reply`] but a missing or malformed reply
    /// becomes [`Judgement::error`].
    pub fn from_reply_or_error(
        stage: StageKind,
        raw: Option<&str>,
        confidence_threshold: u8,
    ) -> Self {
        match raw.map(|r| Self::from_reply(stage, r, confidence_threshold)) {
            Some(Ok(j)) => j,
            Some(Err(e)) => {
                tracing::warn!(stage = %stage, error = %e, "Discarding malformed judgement");
                Self::error(stage)
            }
            None => {
                tracing::warn!(stage = %stage, "No reply from verification model");
                Self::error(stage)
            }
        }
    }
}

/// A reply that carried the required fields, before gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub stage: StageKind,
    pub acceptable: bool,
    pub reason: String,
    pub confidence: u8,
    pub document_type: Option<String>,
}

impl Reply {
    /// Below the threshold the judgement never passes and, for
    /// plausibility, the answer itself is overridden to implausible.
    pub fn gate(self, confidence_threshold: u8) -> Judgement {
        let mut reason = self.reason;
        let mut acceptable = self.acceptable;
        let passed = if self.confidence >= confidence_threshold {
            acceptable
        } else {
            reason.push_str(self.stage.low_confidence_suffix());
            if self.stage == StageKind::Plausibility {
                acceptable = false;
            }
            false
        };
        Judgement {
            stage: self.stage,
            acceptable,
            reason,
            confidence: self.confidence,
            document_type: self.document_type,
            passed,
        }
    }
}

/// Extract the fields a stage needs from a JSON reply.
pub fn parse_reply(stage: StageKind, raw: &str) -> Result<Reply> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| ScreenError::MalformedJudgement(format!("not JSON: {e}")))?;
    let obj = value
        .as_object()
        .ok_or_else(|| ScreenError::MalformedJudgement("reply is not an object".into()))?;

    let key = stage.verdict_key();
    let flag = obj
        .get(key)
        .and_then(boolish)
        .ok_or_else(|| ScreenError::MalformedJudgement(format!("missing or invalid {key}")))?;
    let confidence = confidence_of(obj)?;

    let acceptable = match stage {
        StageKind::Coherency => !flag,
        StageKind::Plausibility => flag,
    };
    let reason = obj
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let document_type = obj
        .get("document_type")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Reply {
        stage,
        acceptable,
        reason,
        confidence,
        document_type,
    })
}

/// Booleans, plus the string and 0/1 forms models sometimes emit.
fn boolish(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

fn confidence_of(obj: &Map<String, Value>) -> Result<u8> {
    let raw = obj
        .get("confidence")
        .ok_or_else(|| ScreenError::MalformedJudgement("missing confidence".into()))?;
    let n = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ScreenError::MalformedJudgement(format!("invalid confidence {raw}")))?;
    if !(1.0..=10.0).contains(&n) {
        return Err(ScreenError::MalformedJudgement(format!(
            "confidence {n} outside [1, 10]"
        )));
    }
    if n.fract() != 0.0 {
        return Err(ScreenError::MalformedJudgement(format!(
            "confidence {n} is not an integer"
        )));
    }
    Ok(n as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coherent_reply_passes_above_threshold() {
        let j = Judgement::from_reply(
            StageKind::Coherency,
            r#"{"is_garbage": false, "reason": "A structured memo.", "confidence": 9}"#,
            7,
        )
        .unwrap();
        assert!(j.acceptable);
        assert!(j.passed);
        assert_eq!(j.reason, "A structured memo.");
        assert_eq!(j.document_type, None);
    }

    #[test]
    fn garbage_reply_fails() {
        let j = Judgement::from_reply(
            StageKind::Coherency,
            r#"{"is_garbage": true, "reason": "Random characters.", "confidence": 10}"#,
            7,
        )
        .unwrap();
        assert!(!j.acceptable);
        assert!(!j.passed);
    }

    #[test]
    fn low_confidence_rejects_and_annotates() {
        let j = Judgement::from_reply(
            StageKind::Coherency,
            r#"{"is_garbage": false, "reason": "Probably fine.", "confidence": 5}"#,
            7,
        )
        .unwrap();
        assert!(j.acceptable);
        assert!(!j.passed);
        assert_eq!(j.reason, "Probably fine. (Rejected due to low confidence score.)");

        let j = Judgement::from_reply(
            StageKind::Plausibility,
            r#"{"is_plausible": true, "reason": "Looks like a memo.", "confidence": 6, "document_type": "Memo"}"#,
            7,
        )
        .unwrap();
        assert!(!j.acceptable);
        assert!(!j.passed);
        assert_eq!(j.document_type.as_deref(), Some("Memo"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let j = Judgement::from_reply(
            StageKind::Plausibility,
            r#"{"is_plausible": true, "reason": "Chat log.", "confidence": 7}"#,
            7,
        )
        .unwrap();
        assert!(j.passed);
    }

    #[test]
    fn low_confidence_suffix_depends_on_stage() {
        let j = Judgement::from_reply(
            StageKind::Plausibility,
            r#"{"is_plausible": true, "reason": "Odd memo.", "confidence": 3}"#,
            7,
        )
        .unwrap();
        assert_eq!(j.reason, "Odd memo. (Rejected due to low confidence.)");
        assert_ne!(
            StageKind::Coherency.low_confidence_suffix(),
            StageKind::Plausibility.low_confidence_suffix()
        );
    }

    #[test]
    fn fractional_confidence_never_rounds_past_threshold() {
        let raw = r#"{"is_garbage": false, "reason": "Fine.", "confidence": 6.5}"#;
        assert!(matches!(
            parse_reply(StageKind::Coherency, raw),
            Err(ScreenError::MalformedJudgement(_))
        ));
        let j = Judgement::from_reply_or_error(StageKind::Coherency, Some(raw), 7);
        assert!(!j.passed);
        assert_eq!(j, Judgement::error(StageKind::Coherency));

        let whole = r#"{"is_garbage": false, "reason": "Fine.", "confidence": 7.0}"#;
        assert!(Judgement::from_reply(StageKind::Coherency, whole, 7).unwrap().passed);
    }

    #[test]
    fn boolish_and_string_confidence_accepted() {
        let reply = parse_reply(
            StageKind::Coherency,
            r#"{"is_garbage": "False", "confidence": "8"}"#,
        )
        .unwrap();
        assert!(reply.acceptable);
        assert_eq!(reply.confidence, 8);
        assert_eq!(reply.reason, "");
    }

    #[test]
    fn malformed_replies_become_error_judgements() {
        for raw in [
            "not json",
            "[1, 2]",
            r#"{"reason": "no verdict", "confidence": 9}"#,
            r#"{"is_garbage": false}"#,
            r#"{"is_garbage": false, "confidence": 42}"#,
            r#"{"is_plausible": true, "confidence": 9}"#,
        ] {
            assert!(parse_reply(StageKind::Coherency, raw).is_err(), "{raw}");
            let j = Judgement::from_reply_or_error(StageKind::Coherency, Some(raw), 7);
            assert_eq!(j, Judgement::error(StageKind::Coherency));
        }
        let j = Judgement::from_reply_or_error(StageKind::Plausibility, None, 7);
        assert_eq!(j.confidence, 0);
        assert!(!j.passed);
        assert_eq!(j.document_type.as_deref(), Some("Error"));
    }
}
