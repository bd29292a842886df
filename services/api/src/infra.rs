use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tender_desk::workflows::tender::bids::{
    BidId, BidNotification, BidRecord, BidRepository, EvaluationRecord, EvaluatorId,
    NotificationError, NotificationPublisher, RepositoryError, TenderId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct BidStore {
    records: HashMap<BidId, BidRecord>,
    log: Vec<EvaluationRecord>,
}

/// Process-local bid store backing the service until the platform database
/// is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBidRepository {
    store: Arc<Mutex<BidStore>>,
}

impl BidRepository for InMemoryBidRepository {
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
        if store.records.contains_key(&record.bid_id) {
            store.records.insert(record.bid_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

/// Collects outbound notifications so demos and tests can inspect them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Arc<Mutex<Vec<BidNotification>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notification: BidNotification) -> Result<(), NotificationError> {
        let mut events = self.events.lock().expect("notification mutex poisoned");
        events.push(notification);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<BidNotification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}
