//! Pipeline sequencing with canned collaborator replies.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use textscreen::screen::config::VerificationConfig;
use textscreen::verify::{FinalVerdict, StageKind, VerificationPipeline, VerificationStage};
use textscreen::Screener;

struct Canned {
    kind: StageKind,
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl VerificationStage for Canned {
    fn kind(&self) -> StageKind {
        self.kind
    }
    fn request(&self, _document: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

struct Harness {
    pipeline: VerificationPipeline,
    coherency_calls: Arc<AtomicUsize>,
    plausibility_calls: Arc<AtomicUsize>,
}

fn harness(coherency: Option<&str>, plausibility: Option<&str>) -> Harness {
    let coherency_calls = Arc::new(AtomicUsize::new(0));
    let plausibility_calls = Arc::new(AtomicUsize::new(0));
    let pipeline = VerificationPipeline::new(
        Screener::default(),
        Box::new(Canned {
            kind: StageKind::Coherency,
            reply: coherency.map(str::to_string),
            calls: coherency_calls.clone(),
        }),
        Box::new(Canned {
            kind: StageKind::Plausibility,
            reply: plausibility.map(str::to_string),
            calls: plausibility_calls.clone(),
        }),
        VerificationConfig::default(),
    )
    .unwrap();
    Harness {
        pipeline,
        coherency_calls,
        plausibility_calls,
    }
}

const COHERENT: &str = r#"{"is_garbage": false, "reason": "Structured chat log.", "confidence": 9}"#;
const PLAUSIBLE: &str = r#"{"is_plausible": true, "reason": "Resembles an internal chat.", "confidence": 8, "document_type": "Chat Log"}"#;

#[test]
fn valid_leak_is_accepted() {
    let h = harness(Some(COHERENT), Some(PLAUSIBLE));
    let report = h.pipeline.run(common::CHAT_LOG);
    assert!(report.accepted(), "{report:?}");
    assert_eq!(
        report.reason,
        "Document passed both coherency and plausibility checks."
    );
    assert!(!report.sanity.unwrap().garbage);
    assert_eq!(
        report.plausibility.unwrap().document_type.as_deref(),
        Some("Chat Log")
    );
}

#[test]
fn garbage_never_reaches_the_model() {
    let h = harness(Some(COHERENT), Some(PLAUSIBLE));
    let report = h.pipeline.run(common::MIXED_NOISE);
    assert_eq!(report.final_verdict, FinalVerdict::Rejected);
    assert!(report.reason.starts_with("Failed heuristic sanity check"));
    assert!(report.coherency.is_none());
    assert_eq!(h.coherency_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.plausibility_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn low_confidence_plausibility_rejects() {
    let h = harness(
        Some(COHERENT),
        Some(r#"{"is_plausible": true, "reason": "Unclear origin.", "confidence": 4, "document_type": "Other"}"#),
    );
    let report = h.pipeline.run(common::CHAT_LOG);
    assert_eq!(report.final_verdict, FinalVerdict::Rejected);
    assert_eq!(
        report.reason,
        "Failed plausibility check: Unclear origin. (Rejected due to low confidence.)"
    );
    let p = report.plausibility.unwrap();
    assert!(!p.acceptable);
    assert_eq!(p.confidence, 4);
}

#[test]
fn failed_request_is_an_error_verdict() {
    let h = harness(None, Some(PLAUSIBLE));
    let report = h.pipeline.run(common::CHAT_LOG);
    assert_eq!(report.final_verdict, FinalVerdict::Rejected);
    let c = report.coherency.unwrap();
    assert_eq!(c.confidence, 0);
    assert_eq!(
        report.reason,
        "Failed coherency check: Failed to get a valid response from the verification model."
    );
    assert_eq!(h.plausibility_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn serialized_report_uses_upper_case_verdict() {
    let h = harness(Some(COHERENT), Some(PLAUSIBLE));
    let json = serde_json::to_value(h.pipeline.run(common::CHAT_LOG)).unwrap();
    assert_eq!(json["final_verdict"], "ACCEPTED");
    assert_eq!(json["coherency"]["stage"], "coherency");
}
