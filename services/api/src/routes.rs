use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use loan_qualifier::applications::{
    application_router, ApplicationRepository, LoanApplicationService,
};
use loan_qualifier::error::AppError;
use loan_qualifier::scoring::compute_emi;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmiRequest {
    pub(crate) principal: f64,
    #[serde(default)]
    pub(crate) annual_rate_percent: Option<f64>,
    pub(crate) tenure_months: u32,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmiResponse {
    pub(crate) principal: f64,
    pub(crate) annual_rate_percent: f64,
    pub(crate) tenure_months: u32,
    pub(crate) emi: f64,
    pub(crate) total_repayment: f64,
    pub(crate) total_interest: f64,
}

pub(crate) fn with_application_routes<R>(service: Arc<LoanApplicationService<R>>) -> axum::Router
where
    R: ApplicationRepository + 'static,
{
    application_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/calculator/emi",
            axum::routing::post(emi_endpoint),
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

/// Stateless EMI calculation for callers that have no stored application.
/// Without an explicit rate the configured lending rate applies.
pub(crate) async fn emi_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EmiRequest>,
) -> Result<Json<EmiResponse>, AppError> {
    let EmiRequest {
        principal,
        annual_rate_percent,
        tenure_months,
    } = payload;
    let annual_rate_percent = annual_rate_percent.unwrap_or(state.annual_rate_percent);

    let breakdown = compute_emi(principal, annual_rate_percent, tenure_months)?;

    Ok(Json(EmiResponse {
        principal,
        annual_rate_percent,
        tenure_months,
        emi: breakdown.emi,
        total_repayment: breakdown.total_repayment,
        total_interest: (breakdown.total_repayment - principal).max(0.0),
    }))
}
