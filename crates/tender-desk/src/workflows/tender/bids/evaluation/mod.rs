mod policy;
mod rules;

pub use policy::{label_status, stage_status};
pub use rules::{
    classify_stage, weighted_total, EXPERIENCE_WEIGHT, FINAL_THRESHOLD, FINANCIAL_THRESHOLD,
    FINANCIAL_WEIGHT, TECHNICAL_THRESHOLD, TECHNICAL_WEIGHT,
};

use super::domain::{BidId, BidStatus, EvaluationScores, EvaluationStage};
use serde::{Deserialize, Serialize};

/// Outcome of one evaluation pass over a bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub bid_id: BidId,
    pub scores: EvaluationScores,
    pub total_score: f64,
    pub stage: EvaluationStage,
    pub status: BidStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Run the stage classifier and status mapper over validated scores.
pub fn evaluate(bid_id: BidId, scores: EvaluationScores, comments: Option<String>) -> EvaluationOutcome {
    let stage = classify_stage(&scores);

    EvaluationOutcome {
        bid_id,
        scores,
        total_score: weighted_total(&scores),
        stage,
        status: stage_status(stage),
        comments,
    }
}
