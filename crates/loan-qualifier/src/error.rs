use crate::applications::router::status_for;
use crate::applications::ApplicationServiceError;
use crate::config::ConfigError;
use crate::scoring::AmortizationError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Application(ApplicationServiceError),
    Calculator(AmortizationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Application(err) => write!(f, "application error: {}", err),
            AppError::Calculator(err) => write!(f, "calculation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Application(err) => Some(err),
            AppError::Calculator(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Calculator(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Application(err) => status_for(err),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ApplicationServiceError> for AppError {
    fn from(value: ApplicationServiceError) -> Self {
        Self::Application(value)
    }
}

impl From<AmortizationError> for AppError {
    fn from(value: AmortizationError) -> Self {
        Self::Calculator(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::RepositoryError;

    #[test]
    fn calculator_errors_map_to_unprocessable() {
        let response = AppError::from(AmortizationError::ZeroTenure).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn missing_application_maps_to_not_found() {
        let error = AppError::from(ApplicationServiceError::from(RepositoryError::NotFound));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn service_errors_keep_their_http_status() {
        let conflict = AppError::from(ApplicationServiceError::from(RepositoryError::Conflict));
        assert!(conflict.to_string().starts_with("application error"));
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let ineligible = AppError::from(ApplicationServiceError::NotEligible);
        assert_eq!(
            ineligible.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn config_errors_are_internal() {
        let response = AppError::from(ConfigError::InvalidPort).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
