use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted bids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BidId(pub String);

/// Identifier wrapper for published tenders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenderId(pub String);

/// Identifier wrapper for the officer performing an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluatorId(pub String);

impl fmt::Display for BidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EvaluatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication status of a tender as seen by the bid workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderStatus {
    Open,
    Closed,
    Awarded,
}

impl TenderStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TenderStatus::Open => "OPEN",
            TenderStatus::Closed => "CLOSED",
            TenderStatus::Awarded => "AWARDED",
        }
    }
}

/// Minimal slice of the advertised tender carried with each bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderSnapshot {
    pub tender_id: TenderId,
    pub title: String,
    pub status: TenderStatus,
}

/// Vendor intake payload for a new bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidSubmission {
    pub tender: TenderSnapshot,
    pub bidder_id: String,
    pub amount: f64,
}

/// Raw component scores captured during one evaluation pass.
///
/// Each component is expected to lie in `[0, 100]`; the range is enforced at
/// the request boundary, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationScores {
    pub technical: f64,
    pub financial: f64,
    pub experience: f64,
}

/// Procurement pipeline stage derived from the weighted evaluation total.
///
/// Ordering reflects progression through the pipeline:
/// `Initial < Technical < Financial < Final`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStage {
    Initial,
    Technical,
    Financial,
    Final,
}

impl EvaluationStage {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStage::Initial => "INITIAL",
            EvaluationStage::Technical => "TECHNICAL",
            EvaluationStage::Financial => "FINANCIAL",
            EvaluationStage::Final => "FINAL",
        }
    }

    /// Parse a stored stage label. Unknown labels yield `None` so callers can
    /// fall back to the conservative routing instead of failing.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "INITIAL" => Some(EvaluationStage::Initial),
            "TECHNICAL" => Some(EvaluationStage::Technical),
            "FINANCIAL" => Some(EvaluationStage::Financial),
            "FINAL" => Some(EvaluationStage::Final),
            _ => None,
        }
    }
}

/// Workflow status persisted on a bid record.
///
/// `UnderReview`, `TechnicalEvaluation`, `Shortlisted`, and `FinalEvaluation`
/// are assigned by the evaluation pass; the remaining statuses come from the
/// submission, comparison, and award flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    Pending,
    UnderReview,
    TechnicalEvaluation,
    Shortlisted,
    FinalEvaluation,
    ComparativeAnalysis,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BidStatus::Pending => "PENDING",
            BidStatus::UnderReview => "UNDER_REVIEW",
            BidStatus::TechnicalEvaluation => "TECHNICAL_EVALUATION",
            BidStatus::Shortlisted => "SHORTLISTED",
            BidStatus::FinalEvaluation => "FINAL_EVALUATION",
            BidStatus::ComparativeAnalysis => "COMPARATIVE_ANALYSIS",
            BidStatus::Accepted => "ACCEPTED",
            BidStatus::Rejected => "REJECTED",
        }
    }
}

/// Role attached to an authenticated caller. Only procurement officers may
/// evaluate or award bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluatorRole {
    Procurement,
    Vendor,
    Citizen,
    Admin,
}

impl EvaluatorRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PROCUREMENT" => Some(EvaluatorRole::Procurement),
            "VENDOR" => Some(EvaluatorRole::Vendor),
            "CITIZEN" => Some(EvaluatorRole::Citizen),
            "ADMIN" => Some(EvaluatorRole::Admin),
            _ => None,
        }
    }

    pub const fn may_evaluate(self) -> bool {
        matches!(self, EvaluatorRole::Procurement)
    }
}

/// Inbound evaluation request prior to boundary validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub bid_id: String,
    pub tender_id: String,
    pub technical_score: f64,
    pub financial_score: f64,
    pub experience_score: f64,
    #[serde(default)]
    pub comments: Option<String>,
}
