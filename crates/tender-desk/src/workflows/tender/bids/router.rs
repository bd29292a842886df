use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    BidId, BidSubmission, EvaluationRequest, EvaluatorId, EvaluatorRole, TenderId,
};
use super::repository::{BidRecord, BidRepository, NotificationPublisher, RepositoryError};
use super::service::{BidEvaluationService, BidServiceError};

/// Router builder exposing HTTP endpoints for bid intake, evaluation, and
/// award.
pub fn bid_router<R, N>(service: Arc<BidEvaluationService<R, N>>) -> Router
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/tenders/bids", post(submit_handler::<R, N>))
        .route("/api/v1/bids/evaluate", post(evaluate_handler::<R, N>))
        .route("/api/v1/bids/:bid_id", get(status_handler::<R, N>))
        .route(
            "/api/v1/bids/:bid_id/evaluations",
            get(evaluation_log_handler::<R, N>),
        )
        .route(
            "/api/v1/tenders/:tender_id/bids",
            get(tender_bids_handler::<R, N>),
        )
        .route(
            "/api/v1/tenders/:tender_id/shortlisted",
            get(shortlisted_handler::<R, N>),
        )
        .route(
            "/api/v1/tenders/:tender_id/award",
            post(award_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AwardRequest {
    pub(crate) bid_id: String,
}

/// Resolve the calling officer from request headers, rejecting callers
/// without the procurement role.
fn authorize_officer(headers: &HeaderMap) -> Result<EvaluatorId, Response> {
    let role = headers
        .get("x-evaluator-role")
        .and_then(|value| value.to_str().ok())
        .and_then(EvaluatorRole::parse);

    match role {
        Some(role) if role.may_evaluate() => {}
        _ => {
            let payload = json!({
                "error": "only procurement officers may evaluate or award bids",
            });
            return Err((StatusCode::FORBIDDEN, axum::Json(payload)).into_response());
        }
    }

    let evaluator = headers
        .get("x-evaluator-id")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match evaluator {
        Some(id) => Ok(EvaluatorId(id.to_string())),
        None => {
            let payload = json!({
                "error": "missing x-evaluator-id header",
            });
            Err((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response())
        }
    }
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<BidEvaluationService<R, N>>>,
    axum::Json(submission): axum::Json<BidSubmission>,
) -> Response
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(
            error @ (BidServiceError::TenderClosed(_) | BidServiceError::InvalidAmount(_)),
        ) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(BidServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "bid already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler<R, N>(
    State(service): State<Arc<BidEvaluationService<R, N>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let evaluator = match authorize_officer(&headers) {
        Ok(evaluator) => evaluator,
        Err(response) => return response,
    };

    match service.evaluate(&evaluator, request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(BidServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(error @ BidServiceError::AlreadyEvaluated { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error @ BidServiceError::TenderMismatch { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(BidServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "bid not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<BidEvaluationService<R, N>>>,
    Path(bid_id): Path<String>,
) -> Response
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = BidId(bid_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(BidServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "bid not found",
                "bid_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluation_log_handler<R, N>(
    State(service): State<Arc<BidEvaluationService<R, N>>>,
    Path(bid_id): Path<String>,
) -> Response
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.evaluation_log(&BidId(bid_id)) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn tender_bids_handler<R, N>(
    State(service): State<Arc<BidEvaluationService<R, N>>>,
    Path(tender_id): Path<String>,
) -> Response
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    bid_listing(service.bids_for_tender(&TenderId(tender_id)))
}

pub(crate) async fn shortlisted_handler<R, N>(
    State(service): State<Arc<BidEvaluationService<R, N>>>,
    Path(tender_id): Path<String>,
) -> Response
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    bid_listing(service.shortlisted(&TenderId(tender_id)))
}

fn bid_listing(result: Result<Vec<BidRecord>, BidServiceError>) -> Response {
    match result {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn award_handler<R, N>(
    State(service): State<Arc<BidEvaluationService<R, N>>>,
    Path(tender_id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<AwardRequest>,
) -> Response
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    if let Err(response) = authorize_officer(&headers) {
        return response;
    }

    match service.award(&TenderId(tender_id), &BidId(request.bid_id)) {
        Ok(winner) => {
            let view = winner.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(BidServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "winning bid not found for tender",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
