use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::tender::bids::domain::{
    BidId, BidSubmission, EvaluationRequest, EvaluationScores, EvaluatorId, TenderId,
    TenderSnapshot, TenderStatus,
};
use crate::workflows::tender::bids::repository::{
    BidNotification, BidRecord, BidRepository, EvaluationRecord, NotificationError,
    NotificationPublisher, RepositoryError,
};
use crate::workflows::tender::bids::{bid_router, BidEvaluationService};

pub(super) fn tender() -> TenderSnapshot {
    TenderSnapshot {
        tender_id: TenderId("tender-road-2026".to_string()),
        title: "Ring Road Resurfacing".to_string(),
        status: TenderStatus::Open,
    }
}

pub(super) fn closed_tender() -> TenderSnapshot {
    TenderSnapshot {
        tender_id: TenderId("tender-archived".to_string()),
        title: "Archived Works".to_string(),
        status: TenderStatus::Closed,
    }
}

pub(super) fn submission(bidder: &str) -> BidSubmission {
    BidSubmission {
        tender: tender(),
        bidder_id: bidder.to_string(),
        amount: 185_000.0,
    }
}

pub(super) fn officer() -> EvaluatorId {
    EvaluatorId("officer-001".to_string())
}

pub(super) fn scores(technical: f64, financial: f64, experience: f64) -> EvaluationScores {
    EvaluationScores {
        technical,
        financial,
        experience,
    }
}

pub(super) fn evaluation_request(
    bid_id: &BidId,
    technical: f64,
    financial: f64,
    experience: f64,
) -> EvaluationRequest {
    EvaluationRequest {
        bid_id: bid_id.0.clone(),
        tender_id: tender().tender_id.0,
        technical_score: technical,
        financial_score: financial,
        experience_score: experience,
        comments: Some("panel consensus".to_string()),
    }
}

pub(super) fn build_service() -> (
    BidEvaluationService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifications::default());
    let service = BidEvaluationService::new(repository.clone(), notifier.clone());
    (service, repository, notifier)
}

pub(super) fn bid_router_with_service(
    service: BidEvaluationService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    bid_router(Arc::new(service))
}

#[derive(Default)]
struct BidStore {
    records: HashMap<BidId, BidRecord>,
    log: Vec<EvaluationRecord>,
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    store: Arc<Mutex<BidStore>>,
}

impl BidRepository for MemoryRepository {
    fn insert(&self, record: BidRecord) -> Result<BidRecord, RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        if store.records.contains_key(&record.bid_id) {
            return Err(RepositoryError::Conflict);
        }
        store.records.insert(record.bid_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: BidRecord) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        store.records.insert(record.bid_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &BidId) -> Result<Option<BidRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store.records.get(id).cloned())
    }

    fn by_tender(&self, tender_id: &TenderId) -> Result<Vec<BidRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = store
            .records
            .values()
            .filter(|record| record.tender.tender_id == *tender_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.bid_id.0.cmp(&b.bid_id.0));
        Ok(records)
    }

    fn record_evaluation(
        &self,
        record: BidRecord,
        entry: EvaluationRecord,
    ) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        if !store.records.contains_key(&record.bid_id) {
            return Err(RepositoryError::NotFound);
        }
        store.records.insert(record.bid_id.clone(), record);
        store.log.push(entry);
        Ok(())
    }

    fn has_evaluation(
        &self,
        bid_id: &BidId,
        evaluator_id: &EvaluatorId,
    ) -> Result<bool, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store
            .log
            .iter()
            .any(|entry| entry.bid_id == *bid_id && entry.evaluator_id == *evaluator_id))
    }

    fn evaluation_log(&self, bid_id: &BidId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store
            .log
            .iter()
            .filter(|entry| entry.bid_id == *bid_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<BidNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<BidNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: BidNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifications;

impl NotificationPublisher for FailingNotifications {
    fn publish(&self, _notification: BidNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl BidRepository for UnavailableRepository {
    fn insert(&self, _record: BidRecord) -> Result<BidRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: BidRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BidId) -> Result<Option<BidRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_tender(&self, _tender_id: &TenderId) -> Result<Vec<BidRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_evaluation(
        &self,
        _record: BidRecord,
        _entry: EvaluationRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn has_evaluation(
        &self,
        _bid_id: &BidId,
        _evaluator_id: &EvaluatorId,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn evaluation_log(&self, _bid_id: &BidId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
