use super::super::domain::{EvaluationScores, EvaluationStage};

pub const TECHNICAL_WEIGHT: f64 = 0.4;
pub const FINANCIAL_WEIGHT: f64 = 0.4;
pub const EXPERIENCE_WEIGHT: f64 = 0.2;

pub const FINAL_THRESHOLD: f64 = 80.0;
pub const FINANCIAL_THRESHOLD: f64 = 70.0;
pub const TECHNICAL_THRESHOLD: f64 = 60.0;

/// Weighted composite of the three component scores.
pub fn weighted_total(scores: &EvaluationScores) -> f64 {
    scores.technical * TECHNICAL_WEIGHT
        + scores.financial * FINANCIAL_WEIGHT
        + scores.experience * EXPERIENCE_WEIGHT
}

/// Map component scores onto a procurement stage.
///
/// The raw weighted sum is compared against the band thresholds in descending
/// order, first match wins, each band inclusive at its lower bound. The total
/// must not be rounded before comparison: rounding can shift a value across a
/// band boundary and change the resulting stage.
///
/// The function is total over all numeric inputs. Scores outside `[0, 100]`
/// extrapolate into the nearest band rather than failing; range enforcement
/// belongs to the request boundary (`validation::validate_scores`).
pub fn classify_stage(scores: &EvaluationScores) -> EvaluationStage {
    let total = weighted_total(scores);

    if total >= FINAL_THRESHOLD {
        return EvaluationStage::Final;
    }
    if total >= FINANCIAL_THRESHOLD {
        return EvaluationStage::Financial;
    }
    if total >= TECHNICAL_THRESHOLD {
        return EvaluationStage::Technical;
    }
    EvaluationStage::Initial
}
