use super::domain::{BidId, EvaluationRequest, EvaluationScores, TenderId};

/// Score component named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Technical,
    Financial,
    Experience,
}

impl ScoreKind {
    pub const fn name(self) -> &'static str {
        match self {
            ScoreKind::Technical => "technical",
            ScoreKind::Financial => "financial",
            ScoreKind::Experience => "experience",
        }
    }
}

/// Violations of the caller-side evaluation contract.
#[derive(Debug, thiserror::Error)]
pub enum ScoreValidationError {
    #[error("{} score {value} must be between 0 and 100", .kind.name())]
    OutOfRange { kind: ScoreKind, value: f64 },
    #[error("{} score is not a finite number", .kind.name())]
    NotFinite { kind: ScoreKind },
    #[error("bid and tender identifiers are required")]
    MissingIdentifiers,
}

/// Validated evaluation input ready for the scoring pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvaluation {
    pub bid_id: BidId,
    pub tender_id: TenderId,
    pub scores: EvaluationScores,
    pub comments: Option<String>,
}

/// Enforce the scoring domain before the classifier runs: every component
/// finite and within `[0, 100]` inclusive. The classifier itself stays
/// permissive, so this is the only place the range is checked.
pub fn validate_scores(scores: &EvaluationScores) -> Result<(), ScoreValidationError> {
    check_component(ScoreKind::Technical, scores.technical)?;
    check_component(ScoreKind::Financial, scores.financial)?;
    check_component(ScoreKind::Experience, scores.experience)?;
    Ok(())
}

/// Convert an inbound request into validated evaluation input.
pub fn validate_request(
    request: EvaluationRequest,
) -> Result<ValidatedEvaluation, ScoreValidationError> {
    if request.bid_id.trim().is_empty() || request.tender_id.trim().is_empty() {
        return Err(ScoreValidationError::MissingIdentifiers);
    }

    let scores = EvaluationScores {
        technical: request.technical_score,
        financial: request.financial_score,
        experience: request.experience_score,
    };
    validate_scores(&scores)?;

    Ok(ValidatedEvaluation {
        bid_id: BidId(request.bid_id),
        tender_id: TenderId(request.tender_id),
        scores,
        comments: request.comments,
    })
}

fn check_component(kind: ScoreKind, value: f64) -> Result<(), ScoreValidationError> {
    if !value.is_finite() {
        return Err(ScoreValidationError::NotFinite { kind });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ScoreValidationError::OutOfRange { kind, value });
    }
    Ok(())
}
