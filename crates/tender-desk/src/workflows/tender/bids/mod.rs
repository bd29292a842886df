//! Bid intake, evaluation, and award workflow for procurement tenders.
//!
//! The scoring rules convert three component scores into a weighted total,
//! the total into a pipeline stage, and the stage into the bid status the
//! rest of the platform routes on. Everything around the rules (validation,
//! persistence, notifications, HTTP) talks through the ports defined in
//! `repository`.

pub mod domain;
pub(crate) mod evaluation;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    BidId, BidStatus, BidSubmission, EvaluationRequest, EvaluationScores, EvaluationStage,
    EvaluatorId, EvaluatorRole, TenderId, TenderSnapshot, TenderStatus,
};
pub use evaluation::{
    classify_stage, evaluate, label_status, stage_status, weighted_total, EvaluationOutcome,
};
pub use repository::{
    BidNotification, BidRecord, BidRepository, BidStatusView, EvaluationRecord, NotificationError,
    NotificationKind, NotificationPublisher, RepositoryError,
};
pub use router::bid_router;
pub use service::{BidEvaluationService, BidServiceError};
pub use validation::{
    validate_request, validate_scores, ScoreKind, ScoreValidationError, ValidatedEvaluation,
};
