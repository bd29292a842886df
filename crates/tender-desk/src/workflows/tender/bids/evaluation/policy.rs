use super::super::domain::{BidStatus, EvaluationStage};

/// Workflow status a bid moves to once its stage is known.
///
/// Any stage without an explicit routing, including stages introduced later,
/// falls through to `UnderReview`; the mapper never fails on an unexpected
/// value.
pub fn stage_status(stage: EvaluationStage) -> BidStatus {
    match stage {
        EvaluationStage::Final => BidStatus::FinalEvaluation,
        EvaluationStage::Financial => BidStatus::Shortlisted,
        EvaluationStage::Technical => BidStatus::TechnicalEvaluation,
        _ => BidStatus::UnderReview,
    }
}

/// Same fallback contract for stage labels read back from stored records:
/// labels that no longer parse route to `UnderReview`.
pub fn label_status(label: &str) -> BidStatus {
    EvaluationStage::from_label(label)
        .map(stage_status)
        .unwrap_or(BidStatus::UnderReview)
}
