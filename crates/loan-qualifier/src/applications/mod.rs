//! Loan application intake, cached scoring, eligibility and quoting.
//!
//! A submitted questionnaire is stored once; ALT-SCORE, RISK-SCORE and the
//! eligibility result are computed on first request and cached on the record.

pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AdditionalProfile, ApplicationId, ApplicationStage, BusinessDuration, BusinessType,
    DocumentRef, DocumentSet, FinancialProfile, PersonalInfo, Questionnaire,
    QuestionnaireSubmission,
};
pub use intake::IntakeViolation;
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, RepositoryError,
};
pub use router::application_router;
pub use service::{ApplicationServiceError, LoanApplicationService, QuoteRequest};
pub use views::{CreditScoreView, ProfileView, RiskScoreView};
