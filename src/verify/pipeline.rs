//! Staged verification: heuristic screen, coherency, plausibility.

use crate::error::{Result, ScreenError};
use crate::screen::config::VerificationConfig;
use crate::screen::{Screener, Verdict, VerdictReason};
use crate::verify::judgement::{Judgement, StageKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A remote judgement collaborator.
///
/// Implementations send the document and return the model's raw JSON reply,
/// or `None` when the request failed. Gating happens in [`run_stage`].
pub trait VerificationStage: Send + Sync {
    fn kind(&self) -> StageKind;
    fn request(&self, document: &str) -> Option<String>;
}

/// Guard, request and gate one stage.
pub fn run_stage(
    stage: &dyn VerificationStage,
    document: &str,
    cfg: &VerificationConfig,
) -> Judgement {
    let kind = stage.kind();
    if document.trim().chars().count() < cfg.min_document_chars {
        return Judgement::too_short(kind);
    }
    let reply = stage.request(document);
    Judgement::from_reply_or_error(kind, reply.as_deref(), cfg.confidence_threshold)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalVerdict {
    Accepted,
    Rejected,
}

/// Everything the pipeline learned about one document. Stages that did not
/// run are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub final_verdict: FinalVerdict,
    pub reason: String,
    pub sanity: Option<Verdict>,
    pub coherency: Option<Judgement>,
    pub plausibility: Option<Judgement>,
}

impl PipelineReport {
    pub fn accepted(&self) -> bool {
        self.final_verdict == FinalVerdict::Accepted
    }
}

/// Sequences the heuristic screener and the two collaborator stages,
/// stopping at the first failure.
pub struct VerificationPipeline {
    screener: Screener,
    coherency: Box<dyn VerificationStage>,
    plausibility: Box<dyn VerificationStage>,
    config: VerificationConfig,
}

impl VerificationPipeline {
    pub fn new(
        screener: Screener,
        coherency: Box<dyn VerificationStage>,
        plausibility: Box<dyn VerificationStage>,
        config: VerificationConfig,
    ) -> Result<Self> {
        for (slot, stage) in [
            (StageKind::Coherency, &coherency),
            (StageKind::Plausibility, &plausibility),
        ] {
            if stage.kind() != slot {
                return Err(ScreenError::Config(format!(
                    "{} stage supplied in the {slot} slot",
                    stage.kind()
                )));
            }
        }
        Ok(Self {
            screener,
            coherency,
            plausibility,
            config,
        })
    }

    pub fn run(&self, document: &str) -> PipelineReport {
        let sanity = if self.config.prefilter {
            let verdict = self.screener.sanity_check(document);
            if verdict.garbage {
                let why = match verdict.reason {
                    VerdictReason::LanguageUndetected => "language undetected".to_string(),
                    VerdictReason::Rule(rule) => rule.to_string(),
                };
                info!(reason = %why, "Rejected by heuristic sanity check");
                return PipelineReport {
                    final_verdict: FinalVerdict::Rejected,
                    reason: format!("Failed heuristic sanity check: {why}"),
                    sanity: Some(verdict),
                    coherency: None,
                    plausibility: None,
                };
            }
            Some(verdict)
        } else {
            None
        };

        let coherency = run_stage(&*self.coherency, document, &self.config);
        if !coherency.passed {
            info!(confidence = coherency.confidence, "Rejected by coherency stage");
            return PipelineReport {
                final_verdict: FinalVerdict::Rejected,
                reason: format!("Failed coherency check: {}", coherency.reason),
                sanity,
                coherency: Some(coherency),
                plausibility: None,
            };
        }

        let plausibility = run_stage(&*self.plausibility, document, &self.config);
        if !plausibility.passed {
            info!(
                confidence = plausibility.confidence,
                "Rejected by plausibility stage"
            );
            return PipelineReport {
                final_verdict: FinalVerdict::Rejected,
                reason: format!("Failed plausibility check: {}", plausibility.reason),
                sanity,
                coherency: Some(coherency),
                plausibility: Some(plausibility),
            };
        }

        info!("Document accepted");
        PipelineReport {
            final_verdict: FinalVerdict::Accepted,
            reason: "Document passed both coherency and plausibility checks.".to_string(),
            sanity,
            coherency: Some(coherency),
            plausibility: Some(plausibility),
        }
    }
}
