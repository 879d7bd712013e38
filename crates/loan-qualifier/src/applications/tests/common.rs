use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::applications::domain::{
    AdditionalProfile, ApplicationId, BusinessDuration, BusinessType, DocumentRef, DocumentSet,
    FinancialProfile, PersonalInfo, QuestionnaireSubmission,
};
use crate::applications::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};
use crate::applications::{application_router, LoanApplicationService};
use crate::config::LendingConfig;

pub(super) fn personal_info() -> PersonalInfo {
    PersonalInfo {
        first_name: Some("Meera".to_string()),
        middle_name: None,
        last_name: Some("Iyer".to_string()),
        gender: Some("female".to_string()),
        dob: NaiveDate::from_ymd_opt(1986, 4, 12),
        email: Some("meera@example.in".to_string()),
        phone: Some("9876543210".to_string()),
        alt_phone: None,
        address: Some("14 Market Road, Madurai".to_string()),
    }
}

/// Profitable, established, digital-first shop with a strong bureau record.
pub(super) fn submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        applicant_id: "applicant-001".to_string(),
        personal_info: personal_info(),
        financial_info: FinancialProfile {
            business_type: Some(BusinessType::Retail),
            business_duration: Some(BusinessDuration::FiveYearsOrMore),
            stock_value: Some(80_000),
            monthly_upi_transactions: Some(60_000),
            monthly_cash_income: Some(20_000),
            monthly_expenses: Some(40_000),
            existing_loan: Some(false),
        },
        additional_info: AdditionalProfile {
            has_credit_history: Some(true),
            credit_score: Some(760),
            owns_house: Some(true),
            owns_business: Some(false),
            receives_govt_benefits: Some(false),
            benefit_type: None,
        },
        documents: DocumentSet {
            identity_proof: Some(DocumentRef {
                storage_key: "docs/applicant-001/aadhaar.jpg".to_string(),
                verified: None,
            }),
            pan_card: None,
            shop_photo: Some(DocumentRef {
                storage_key: "docs/applicant-001/shop.jpg".to_string(),
                verified: Some(true),
            }),
        },
    }
}

/// Young business on thin margins with an existing loan; lands in the medium tier.
pub(super) fn medium_tier_submission() -> QuestionnaireSubmission {
    let mut submission = submission();
    submission.applicant_id = "applicant-002".to_string();
    submission.financial_info = FinancialProfile {
        business_type: Some(BusinessType::Service),
        business_duration: Some(BusinessDuration::LessThanFiveYears),
        stock_value: Some(15_000),
        monthly_upi_transactions: Some(20_000),
        monthly_cash_income: Some(20_000),
        monthly_expenses: Some(38_000),
        existing_loan: Some(true),
    };
    submission.additional_info = AdditionalProfile {
        has_credit_history: Some(true),
        credit_score: Some(610),
        owns_house: Some(false),
        owns_business: Some(true),
        receives_govt_benefits: Some(false),
        benefit_type: None,
    };
    submission
}

/// Loss-making, cash-heavy and indebted; not eligible for any amount.
pub(super) fn ineligible_submission() -> QuestionnaireSubmission {
    let mut submission = submission();
    submission.applicant_id = "applicant-003".to_string();
    submission.financial_info = FinancialProfile {
        business_type: Some(BusinessType::Other),
        business_duration: Some(BusinessDuration::LessThanFiveYears),
        stock_value: Some(4_000),
        monthly_upi_transactions: Some(5_000),
        monthly_cash_income: Some(25_000),
        monthly_expenses: Some(34_000),
        existing_loan: Some(true),
    };
    submission.additional_info = AdditionalProfile::default();
    submission
}

pub(super) fn build_service() -> (LoanApplicationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LoanApplicationService::new(repository.clone(), LendingConfig::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
    pub(super) updates: Arc<Mutex<usize>>,
}

impl MemoryRepository {
    pub(super) fn update_count(&self) -> usize {
        *self.updates.lock().expect("update counter poisoned")
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&record.application_id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.application_id.clone(), record);
        *self.updates.lock().expect("update counter poisoned") += 1;
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: LoanApplicationService<MemoryRepository>,
) -> axum::Router {
    application_router(Arc::new(service))
}
