use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryBidRepository, InMemoryNotificationPublisher};
use crate::routes::with_bid_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tender_desk::config::AppConfig;
use tender_desk::error::AppError;
use tender_desk::telemetry;
use tender_desk::workflows::tender::bids::BidEvaluationService;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryBidRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let evaluation_service = Arc::new(BidEvaluationService::new(repository, notifier));

    let app = with_bid_routes(evaluation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tender bid evaluation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
