use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tender_desk::error::AppError;
use tender_desk::workflows::tender::bids::{
    bid_router, classify_stage, stage_status, validate_scores, weighted_total,
    BidEvaluationService, BidRepository, BidServiceError, EvaluationScores, NotificationPublisher,
};

/// Stateless classification preview used by batch and administrative flows.
/// Same contract as the evaluation endpoint, nothing persisted.
#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationPreviewRequest {
    pub(crate) technical_score: f64,
    pub(crate) financial_score: f64,
    pub(crate) experience_score: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationPreviewResponse {
    pub(crate) total_score: f64,
    pub(crate) stage: &'static str,
    pub(crate) status: &'static str,
}

pub(crate) fn with_bid_routes<R, N>(service: Arc<BidEvaluationService<R, N>>) -> axum::Router
where
    R: BidRepository + 'static,
    N: NotificationPublisher + 'static,
{
    bid_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/evaluations/preview",
            axum::routing::post(evaluation_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluation_preview_endpoint(
    Json(payload): Json<EvaluationPreviewRequest>,
) -> Result<Json<EvaluationPreviewResponse>, AppError> {
    let scores = EvaluationScores {
        technical: payload.technical_score,
        financial: payload.financial_score,
        experience: payload.experience_score,
    };
    validate_scores(&scores).map_err(BidServiceError::from)?;

    let stage = classify_stage(&scores);
    Ok(Json(EvaluationPreviewResponse {
        total_score: weighted_total(&scores),
        stage: stage.label(),
        status: stage_status(stage).label(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preview_endpoint_shortlists_financial_band_scores() {
        let request = EvaluationPreviewRequest {
            technical_score: 75.0,
            financial_score: 75.0,
            experience_score: 75.0,
        };

        let Json(body) = evaluation_preview_endpoint(Json(request))
            .await
            .expect("preview computes");

        assert_eq!(body.stage, "FINANCIAL");
        assert_eq!(body.status, "SHORTLISTED");
        assert!((body.total_score - 75.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn preview_endpoint_reports_the_weighted_edge_case() {
        let request = EvaluationPreviewRequest {
            technical_score: 100.0,
            financial_score: 70.0,
            experience_score: 60.0,
        };

        let Json(body) = evaluation_preview_endpoint(Json(request))
            .await
            .expect("preview computes");

        assert_eq!(body.total_score, 80.0);
        assert_eq!(body.stage, "FINAL");
        assert_eq!(body.status, "FINAL_EVALUATION");
    }

    #[tokio::test]
    async fn preview_endpoint_rejects_out_of_range_scores() {
        let request = EvaluationPreviewRequest {
            technical_score: 130.0,
            financial_score: 70.0,
            experience_score: 60.0,
        };

        let error = evaluation_preview_endpoint(Json(request))
            .await
            .expect_err("out-of-range scores are rejected");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
