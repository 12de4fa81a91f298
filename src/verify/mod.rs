//! Contract with the remote judgement collaborators.
//!
//! The crate does not talk to any model itself. It defines the reply shape,
//! the confidence gate, and the sequencing that puts the heuristic screener
//! in front of the coherency and plausibility stages.

pub mod insights;
pub mod judgement;
pub mod pipeline;

pub use insights::LeakInsights;
pub use judgement::{Judgement, StageKind};
pub use pipeline::{
    run_stage, FinalVerdict, PipelineReport, VerificationPipeline, VerificationStage,
};
