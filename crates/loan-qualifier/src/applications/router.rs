use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{ApplicationId, QuestionnaireSubmission};
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{ApplicationServiceError, LoanApplicationService, QuoteRequest};
use super::views::{CreditScoreView, RiskScoreView};
use crate::scoring::{CreditScoreResult, RiskScoreResult, ScoreComponent, ScoreReason};

type SharedService<R> = Arc<LoanApplicationService<R>>;

/// Router builder exposing intake, scoring, eligibility and quote endpoints.
pub fn application_router<R>(service: SharedService<R>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R>))
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/profile",
            get(profile_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/alt-score",
            get(alt_score_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/risk-score",
            get(risk_score_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/eligibility",
            get(eligibility_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/eligibility/recompute",
            post(recompute_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/quote",
            post(quote_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<SharedService<R>>,
    axum::Json(submission): axum::Json<QuestionnaireSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<SharedService<R>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    respond(service.get(&id).map(|record| record.status_view()))
}

pub(crate) async fn profile_handler<R>(
    State(service): State<SharedService<R>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    respond(service.profile(&ApplicationId(application_id)))
}

#[derive(Serialize)]
struct AltScoreResponse {
    #[serde(flatten)]
    view: CreditScoreView,
    components: Vec<ScoreComponent>,
    reasons: Vec<ScoreReason>,
    tips: Vec<String>,
}

impl From<CreditScoreResult> for AltScoreResponse {
    fn from(result: CreditScoreResult) -> Self {
        Self {
            view: CreditScoreView::from(&result),
            components: result.components,
            reasons: result.reasons,
            tips: result.tips,
        }
    }
}

pub(crate) async fn alt_score_handler<R>(
    State(service): State<SharedService<R>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    respond(
        service
            .credit_score(&ApplicationId(application_id))
            .map(AltScoreResponse::from),
    )
}

#[derive(Serialize)]
struct RiskScoreResponse {
    #[serde(flatten)]
    view: RiskScoreView,
    components: Vec<ScoreComponent>,
    reasons: Vec<ScoreReason>,
    tips: Vec<String>,
}

impl From<RiskScoreResult> for RiskScoreResponse {
    fn from(result: RiskScoreResult) -> Self {
        Self {
            view: RiskScoreView::from(&result),
            components: result.components,
            reasons: result.reasons,
            tips: result.tips,
        }
    }
}

pub(crate) async fn risk_score_handler<R>(
    State(service): State<SharedService<R>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    respond(
        service
            .risk_score(&ApplicationId(application_id))
            .map(RiskScoreResponse::from),
    )
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<SharedService<R>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    respond(service.eligibility(&ApplicationId(application_id)))
}

pub(crate) async fn recompute_handler<R>(
    State(service): State<SharedService<R>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    respond(service.recompute_eligibility(&ApplicationId(application_id)))
}

pub(crate) async fn quote_handler<R>(
    State(service): State<SharedService<R>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    respond(service.quote(&ApplicationId(application_id), request))
}

fn respond<T: Serialize>(result: Result<T, ApplicationServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn status_for(error: &ApplicationServiceError) -> StatusCode {
    match error {
        ApplicationServiceError::Intake(_)
        | ApplicationServiceError::Quote(_)
        | ApplicationServiceError::NotEligible => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: ApplicationServiceError) -> Response {
    let status = status_for(&error);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(%error, "application repository failure");
    }

    let message = match &error {
        ApplicationServiceError::Repository(RepositoryError::Conflict) => {
            "application already exists".to_string()
        }
        ApplicationServiceError::Repository(RepositoryError::NotFound) => {
            "application not found".to_string()
        }
        other => other.to_string(),
    };

    (status, axum::Json(json!({ "error": message }))).into_response()
}
