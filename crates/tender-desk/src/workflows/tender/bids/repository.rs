use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{BidId, BidStatus, EvaluatorId, TenderId, TenderSnapshot};
use super::evaluation::EvaluationOutcome;

/// Repository record for one submitted bid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidRecord {
    pub bid_id: BidId,
    pub tender: TenderSnapshot,
    pub bidder_id: String,
    pub amount: f64,
    pub status: BidStatus,
    pub submitted_at: DateTime<Utc>,
    pub evaluation: Option<EvaluationOutcome>,
}

impl BidRecord {
    pub fn rationale(&self) -> String {
        match &self.evaluation {
            Some(outcome) => format!(
                "weighted total {:.1} places the bid in the {} stage",
                outcome.total_score,
                outcome.stage.label()
            ),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> BidStatusView {
        BidStatusView {
            bid_id: self.bid_id.clone(),
            tender_id: self.tender.tender_id.clone(),
            status: self.status.label(),
            stage: self.evaluation.as_ref().map(|outcome| outcome.stage.label()),
            total_score: self.evaluation.as_ref().map(|outcome| outcome.total_score),
            rationale: self.rationale(),
        }
    }
}

/// Append-only log entry capturing one evaluation pass. The stage is stored
/// as its label, matching the audit table the platform keeps upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub bid_id: BidId,
    pub tender_id: TenderId,
    pub evaluator_id: EvaluatorId,
    pub stage: String,
    pub technical_score: f64,
    pub financial_score: f64,
    pub experience_score: f64,
    pub total_score: f64,
    pub comments: String,
    pub recorded_at: DateTime<Utc>,
}

/// Storage abstraction so the workflow can be exercised without a database.
pub trait BidRepository: Send + Sync {
    fn insert(&self, record: BidRecord) -> Result<BidRecord, RepositoryError>;
    fn update(&self, record: BidRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &BidId) -> Result<Option<BidRecord>, RepositoryError>;
    fn by_tender(&self, tender_id: &TenderId) -> Result<Vec<BidRecord>, RepositoryError>;
    /// Commit the updated bid and its log entry as one unit. Implementations
    /// must apply both writes or neither, so a stored status can never
    /// disagree with the evaluation log.
    fn record_evaluation(
        &self,
        record: BidRecord,
        entry: EvaluationRecord,
    ) -> Result<(), RepositoryError>;
    fn has_evaluation(
        &self,
        bid_id: &BidId,
        evaluator_id: &EvaluatorId,
    ) -> Result<bool, RepositoryError>;
    fn evaluation_log(&self, bid_id: &BidId) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (e-mail or in-app adapters).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: BidNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    BidSubmitted,
    BidEvaluated,
    TenderAwarded,
}

/// Notification payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidNotification {
    pub kind: NotificationKind,
    pub bid_id: BidId,
    pub tender_id: TenderId,
    pub recipient: String,
    pub message: String,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Public snapshot of a bid's workflow position.
#[derive(Debug, Clone, Serialize)]
pub struct BidStatusView {
    pub bid_id: BidId,
    pub tender_id: TenderId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    pub rationale: String,
}
