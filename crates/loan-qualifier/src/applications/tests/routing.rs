use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::applications::router::submit_handler;
use crate::applications::LoanApplicationService;
use crate::config::LendingConfig;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let service = Arc::new(LoanApplicationService::new(
        Arc::new(ConflictRepository),
        LendingConfig::default(),
    ));

    let response =
        submit_handler::<ConflictRepository>(State(service), axum::Json(submission())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "application already exists");
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(LoanApplicationService::new(
        Arc::new(UnavailableRepository),
        LendingConfig::default(),
    ));

    let response =
        submit_handler::<UnavailableRepository>(State(service), axum::Json(submission())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn submit_route_creates_application() {
    let (service, _) = build_service();
    let router = application_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            serde_json::to_value(submission()).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["applicationId"], "applicant-001");
    assert_eq!(body["stage"], "submitted");
    assert_eq!(body["eligibilitySummary"], "pending eligibility assessment");
}

#[tokio::test]
async fn submit_route_rejects_invalid_questionnaire() {
    let (service, _) = build_service();
    let router = application_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({
                "applicantId": "applicant-009",
                "additionalInfo": { "hasCreditHistory": false, "creditScore": 720 }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "credit score reported without a credit history"
    );
}

#[tokio::test]
async fn unknown_application_returns_not_found() {
    let (service, _) = build_service();
    let router = application_router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/applications/nobody/eligibility"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "application not found");
}

#[tokio::test]
async fn scoring_routes_expose_cached_results() {
    let (service, _) = build_service();
    service.submit(submission()).expect("submitted");
    let router = application_router_with_service(service);

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/applications/applicant-001/alt-score"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], 900);
    assert_eq!(body["band"], "Excellent");
    assert_eq!(body["isDataSufficient"], true);
    assert_eq!(body["visualPercent"], 100.0);
    assert!(body["reasons"].as_array().is_some_and(|reasons| !reasons.is_empty()));

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/applications/applicant-001/risk-score"))
        .await
        .unwrap();
    let body = read_json_body(response).await;
    assert_eq!(body["riskScore"], 2.0);
    assert_eq!(body["category"], "Low");

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/applications/applicant-001/eligibility"))
        .await
        .unwrap();
    let body = read_json_body(response).await;
    assert_eq!(body["maxLoanAmount"], 100_000);

    let response = router
        .oneshot(get_request("/api/v1/applications/applicant-001"))
        .await
        .unwrap();
    let body = read_json_body(response).await;
    assert_eq!(body["stage"], "assessed");
    assert_eq!(body["creditScore"], 900);
}

#[tokio::test]
async fn quote_route_prices_selection() {
    let (service, _) = build_service();
    service.submit(submission()).expect("submitted");
    let router = application_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications/applicant-001/quote",
            json!({ "amount": 45_000, "tenureMonths": 12 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["emi"], 3_956.0);
    assert_eq!(body["totalRepayment"], 47_475.0);
    assert_eq!(body["tenureMonths"], 12);
    assert_eq!(body["totalInterest"], 2_475.0);
}

#[tokio::test]
async fn quote_route_rejects_ineligible_application() {
    let (service, _) = build_service();
    service.submit(ineligible_submission()).expect("submitted");
    let router = application_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications/applicant-003/quote",
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn recompute_route_returns_fresh_result() {
    let (service, _) = build_service();
    service.submit(medium_tier_submission()).expect("submitted");
    let router = application_router_with_service(service);

    let response = router
        .oneshot(
            Request::post("/api/v1/applications/applicant-002/eligibility/recompute")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["tier"], "Medium");
    assert_eq!(body["maxLoanAmount"], 60_000);
}

#[tokio::test]
async fn profile_route_reports_completion() {
    let (service, _) = build_service();
    service.submit(submission()).expect("submitted");
    let router = application_router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/applications/applicant-001/profile"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["completion"]["percentage"], 100);
    assert!(body.get("credit").is_none());
}

fn snake_case_keys(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if key.contains('_') {
                    found.push(key.clone());
                }
                snake_case_keys(nested, found);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| snake_case_keys(item, found)),
        _ => {}
    }
}

#[tokio::test]
async fn response_payloads_use_camel_case_keys() {
    let (service, _) = build_service();
    service.submit(submission()).expect("submitted");
    let router = application_router_with_service(service);

    let mut found = Vec::new();
    for path in ["alt-score", "risk-score", "eligibility", "profile", ""] {
        let uri = format!("/api/v1/applications/applicant-001/{path}");
        let response = router
            .clone()
            .oneshot(get_request(uri.trim_end_matches('/')))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        snake_case_keys(&read_json_body(response).await, &mut found);
    }

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications/applicant-001/quote",
            json!({ "tenureMonths": 6 }),
        ))
        .await
        .unwrap();
    let body = read_json_body(response).await;
    assert_eq!(body["tenureMonths"], 6);
    snake_case_keys(&body, &mut found);

    assert!(found.is_empty(), "snake_case keys in responses: {found:?}");
}
