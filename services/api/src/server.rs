use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_qualifier::applications::LoanApplicationService;
use loan_qualifier::config::AppConfig;
use loan_qualifier::error::AppError;
use loan_qualifier::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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
        annual_rate_percent: config.lending.annual_rate_percent,
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let application_service = Arc::new(LoanApplicationService::new(
        repository,
        config.lending.clone(),
    ));

    let app = with_application_routes(application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        annual_rate_percent = config.lending.annual_rate_percent,
        medium_tier_ratio = config.lending.eligibility.medium_tier_ratio,
        "loan qualifier ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
