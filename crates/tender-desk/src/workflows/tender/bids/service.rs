use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::domain::{
    BidId, BidStatus, BidSubmission, EvaluationRequest, EvaluatorId, TenderId, TenderStatus,
};
use super::evaluation::{self, EvaluationOutcome};
use super::repository::{
    BidNotification, BidRecord, BidRepository, EvaluationRecord, NotificationKind,
    NotificationPublisher, RepositoryError,
};
use super::validation::{validate_request, ScoreValidationError};

/// Service composing the validation boundary, storage port, and scoring rules.
pub struct BidEvaluationService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

static BID_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_bid_id() -> BidId {
    let id = BID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    BidId(format!("bid-{id:06}"))
}

impl<R, N> BidEvaluationService<R, N>
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Register a vendor bid against an open tender.
    pub fn submit(&self, submission: BidSubmission) -> Result<BidRecord, BidServiceError> {
        if submission.tender.status != TenderStatus::Open {
            return Err(BidServiceError::TenderClosed(submission.tender.tender_id));
        }
        if !submission.amount.is_finite() || submission.amount <= 0.0 {
            return Err(BidServiceError::InvalidAmount(submission.amount));
        }

        let record = BidRecord {
            bid_id: next_bid_id(),
            tender: submission.tender,
            bidder_id: submission.bidder_id,
            amount: submission.amount,
            status: BidStatus::Pending,
            submitted_at: Utc::now(),
            evaluation: None,
        };

        let stored = self.repository.insert(record)?;

        self.notify(BidNotification {
            kind: NotificationKind::BidSubmitted,
            bid_id: stored.bid_id.clone(),
            tender_id: stored.tender.tender_id.clone(),
            recipient: stored.bidder_id.clone(),
            message: format!(
                "Your bid for tender \"{}\" has been received.",
                stored.tender.title
            ),
        });

        Ok(stored)
    }

    /// Run one evaluation pass over a bid and persist the outcome.
    ///
    /// The status update and the evaluation log entry commit through a single
    /// repository call so a failure leaves the bid's prior state untouched.
    /// Notification failures are logged and never roll the evaluation back.
    pub fn evaluate(
        &self,
        evaluator_id: &EvaluatorId,
        request: EvaluationRequest,
    ) -> Result<EvaluationOutcome, BidServiceError> {
        let validated = validate_request(request)?;

        let mut record = self
            .repository
            .fetch(&validated.bid_id)?
            .ok_or(RepositoryError::NotFound)?;

        if record.tender.tender_id != validated.tender_id {
            return Err(BidServiceError::TenderMismatch {
                bid_id: validated.bid_id,
                tender_id: validated.tender_id,
            });
        }

        if self
            .repository
            .has_evaluation(&validated.bid_id, evaluator_id)?
        {
            return Err(BidServiceError::AlreadyEvaluated {
                bid_id: validated.bid_id,
                evaluator_id: evaluator_id.clone(),
            });
        }

        let outcome = evaluation::evaluate(
            validated.bid_id.clone(),
            validated.scores,
            validated.comments.clone(),
        );

        let entry = EvaluationRecord {
            bid_id: validated.bid_id,
            tender_id: validated.tender_id,
            evaluator_id: evaluator_id.clone(),
            stage: outcome.stage.label().to_string(),
            technical_score: validated.scores.technical,
            financial_score: validated.scores.financial,
            experience_score: validated.scores.experience,
            total_score: outcome.total_score,
            comments: validated.comments.unwrap_or_default(),
            recorded_at: Utc::now(),
        };

        record.status = outcome.status;
        record.evaluation = Some(outcome.clone());
        self.repository.record_evaluation(record.clone(), entry)?;

        self.notify(BidNotification {
            kind: NotificationKind::BidEvaluated,
            bid_id: record.bid_id.clone(),
            tender_id: record.tender.tender_id.clone(),
            recipient: record.bidder_id.clone(),
            message: format!(
                "Your bid for tender \"{}\" has been evaluated. Status: {}",
                record.tender.title,
                outcome.status.label()
            ),
        });

        Ok(outcome)
    }

    /// Award the tender to one bid; every other bid for the tender is
    /// rejected and the winner is notified.
    pub fn award(
        &self,
        tender_id: &TenderId,
        winning_bid: &BidId,
    ) -> Result<BidRecord, BidServiceError> {
        let bids = self.repository.by_tender(tender_id)?;

        if !bids.iter().any(|record| record.bid_id == *winning_bid) {
            return Err(BidServiceError::Repository(RepositoryError::NotFound));
        }

        let mut winner = None;
        for mut record in bids {
            record.status = if record.bid_id == *winning_bid {
                BidStatus::Accepted
            } else {
                BidStatus::Rejected
            };
            record.tender.status = TenderStatus::Awarded;
            self.repository.update(record.clone())?;

            if record.bid_id == *winning_bid {
                winner = Some(record);
            }
        }

        let winner = winner.ok_or(RepositoryError::NotFound)?;

        self.notify(BidNotification {
            kind: NotificationKind::TenderAwarded,
            bid_id: winner.bid_id.clone(),
            tender_id: winner.tender.tender_id.clone(),
            recipient: winner.bidder_id.clone(),
            message: format!(
                "Tender \"{}\" has been awarded to your bid.",
                winner.tender.title
            ),
        });

        Ok(winner)
    }

    /// Fetch a bid and its current status for API responses.
    pub fn get(&self, bid_id: &BidId) -> Result<BidRecord, BidServiceError> {
        let record = self
            .repository
            .fetch(bid_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn bids_for_tender(&self, tender_id: &TenderId) -> Result<Vec<BidRecord>, BidServiceError> {
        Ok(self.repository.by_tender(tender_id)?)
    }

    /// Bids a tender's evaluation passes have shortlisted, i.e. weighted
    /// totals in the `[70, 80)` band.
    pub fn shortlisted(&self, tender_id: &TenderId) -> Result<Vec<BidRecord>, BidServiceError> {
        let bids = self.repository.by_tender(tender_id)?;
        Ok(bids
            .into_iter()
            .filter(|record| record.status == BidStatus::Shortlisted)
            .collect())
    }

    pub fn evaluation_log(&self, bid_id: &BidId) -> Result<Vec<EvaluationRecord>, BidServiceError> {
        Ok(self.repository.evaluation_log(bid_id)?)
    }

    fn notify(&self, notification: BidNotification) {
        if let Err(err) = self.notifier.publish(notification) {
            warn!(error = %err, "bidder notification failed");
        }
    }
}

/// Error raised by the bid evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum BidServiceError {
    #[error(transparent)]
    Validation(#[from] ScoreValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("bid {bid_id} has already been evaluated by {evaluator_id}")]
    AlreadyEvaluated {
        bid_id: BidId,
        evaluator_id: EvaluatorId,
    },
    #[error("bid {bid_id} does not belong to tender {tender_id}")]
    TenderMismatch { bid_id: BidId, tender_id: TenderId },
    #[error("tender {0} is not accepting bids")]
    TenderClosed(TenderId),
    #[error("bid amount {0} must be a positive number")]
    InvalidAmount(f64),
}
