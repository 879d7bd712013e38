use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationStage, Questionnaire};
use crate::scoring::{CreditScoreResult, EligibilityResult, RiskScoreResult};

/// Repository record: the submitted questionnaire plus its cached scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub submitted_at: DateTime<Utc>,
    pub questionnaire: Questionnaire,
    pub credit_score: Option<CreditScoreResult>,
    pub risk_score: Option<RiskScoreResult>,
    pub eligibility: Option<EligibilityResult>,
}

impl ApplicationRecord {
    pub fn new(application_id: ApplicationId, questionnaire: Questionnaire) -> Self {
        Self {
            application_id,
            submitted_at: Utc::now(),
            questionnaire,
            credit_score: None,
            risk_score: None,
            eligibility: None,
        }
    }

    pub fn stage(&self) -> ApplicationStage {
        if self.eligibility.is_some() {
            ApplicationStage::Assessed
        } else if self.credit_score.is_some() && self.risk_score.is_some() {
            ApplicationStage::Scored
        } else {
            ApplicationStage::Submitted
        }
    }

    pub fn eligibility_summary(&self) -> String {
        match &self.eligibility {
            Some(result) => result.summary(),
            None => "pending eligibility assessment".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            stage: self.stage().label(),
            submitted_at: self.submitted_at,
            eligibility_summary: self.eligibility_summary(),
            credit_score: self.credit_score.as_ref().map(|result| result.score),
            risk_score: self.risk_score.as_ref().map(|result| result.risk_score),
            max_loan_amount: self
                .eligibility
                .as_ref()
                .map(|result| result.max_loan_amount),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public status payload for an application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub stage: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub eligibility_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_loan_amount: Option<u64>,
}
