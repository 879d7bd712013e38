use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use tracing::{debug, info};

use super::domain::{ApplicationId, QuestionnaireSubmission};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};
use super::views::ProfileView;
use crate::config::LendingConfig;
use crate::scoring::{
    AltScoreModel, AmortizationError, CompletionRubric, CreditScoreResult, EligibilityPolicy,
    EligibilityResult, LoanQuote, LoanSelection, RiskScoreModel, RiskScoreResult,
};

/// Requested amount and tenure; missing values fall back to the initial selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub amount: Option<u64>,
    pub tenure_months: Option<u32>,
}

/// Service composing intake, the scoring models and the repository.
pub struct LoanApplicationService<R> {
    guard: Arc<IntakeGuard>,
    repository: Arc<R>,
    alt_model: AltScoreModel,
    risk_model: RiskScoreModel,
    policy: Arc<EligibilityPolicy>,
    rubric: Arc<CompletionRubric>,
    annual_rate_percent: f64,
    locks: Mutex<HashMap<ApplicationId, Arc<Mutex<()>>>>,
}

impl<R> LoanApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: LendingConfig) -> Self {
        Self {
            guard: Arc::new(IntakeGuard),
            repository,
            alt_model: AltScoreModel,
            risk_model: RiskScoreModel,
            policy: Arc::new(EligibilityPolicy::new(config.eligibility)),
            rubric: Arc::new(CompletionRubric::standard()),
            annual_rate_percent: config.annual_rate_percent,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Validate and store a questionnaire. Scores are computed lazily.
    pub fn submit(
        &self,
        submission: QuestionnaireSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let (application_id, questionnaire) =
            self.guard.questionnaire_from_submission(submission)?;
        let record = ApplicationRecord::new(application_id, questionnaire);

        let stored = self.repository.insert(record)?;
        info!(application_id = %stored.application_id.0, "application submitted");
        Ok(stored)
    }

    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Cached ALT-SCORE, computed on first request.
    pub fn credit_score(
        &self,
        application_id: &ApplicationId,
    ) -> Result<CreditScoreResult, ApplicationServiceError> {
        self.with_record(application_id, |record| {
            Ok(self.ensure_credit_score(record))
        })
    }

    /// Cached RISK-SCORE, computed on first request.
    pub fn risk_score(
        &self,
        application_id: &ApplicationId,
    ) -> Result<RiskScoreResult, ApplicationServiceError> {
        self.with_record(application_id, |record| Ok(self.ensure_risk_score(record)))
    }

    /// Cached eligibility; missing score prerequisites are computed first.
    pub fn eligibility(
        &self,
        application_id: &ApplicationId,
    ) -> Result<EligibilityResult, ApplicationServiceError> {
        self.with_record(application_id, |record| {
            if let Some(existing) = &record.eligibility {
                return Ok(existing.clone());
            }
            Ok(self.assess(record))
        })
    }

    /// Discard the cached eligibility and evaluate it again from the cached scores.
    pub fn recompute_eligibility(
        &self,
        application_id: &ApplicationId,
    ) -> Result<EligibilityResult, ApplicationServiceError> {
        self.with_record(application_id, |record| {
            record.eligibility = None;
            Ok(self.assess(record))
        })
    }

    /// Price a selection against the application's eligibility ceiling.
    pub fn quote(
        &self,
        application_id: &ApplicationId,
        request: QuoteRequest,
    ) -> Result<LoanQuote, ApplicationServiceError> {
        let eligibility = self.eligibility(application_id)?;
        if !eligibility.is_eligible() {
            return Err(ApplicationServiceError::NotEligible);
        }

        let initial = LoanSelection::initial(eligibility.max_loan_amount);
        let selection = LoanSelection::clamped(
            request.amount.unwrap_or(initial.amount),
            request.tenure_months.unwrap_or(initial.tenure_months),
            eligibility.max_loan_amount,
        );

        let quote = selection.quote(self.annual_rate_percent)?;
        debug!(
            application_id = %application_id.0,
            amount = quote.amount,
            tenure_months = quote.tenure_months,
            emi = quote.emi,
            "quote priced"
        );
        Ok(quote)
    }

    /// Read-only profile summary; never triggers scoring.
    pub fn profile(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ProfileView, ApplicationServiceError> {
        let record = self.get(application_id)?;
        Ok(ProfileView::from_record(&record, &self.rubric))
    }

    fn assess(&self, record: &mut ApplicationRecord) -> EligibilityResult {
        let credit = self.ensure_credit_score(record).score;
        let risk = self.ensure_risk_score(record).risk_score;
        let has_history = record.questionnaire.additional_info.credit_history_on_file();

        let result = self.policy.determine(credit, risk, has_history);
        info!(
            application_id = %record.application_id.0,
            credit_score = credit,
            risk_score = risk,
            tier = result.tier.label(),
            max_loan_amount = result.max_loan_amount,
            "eligibility assessed"
        );
        record.eligibility = Some(result.clone());
        result
    }

    fn ensure_credit_score(&self, record: &mut ApplicationRecord) -> CreditScoreResult {
        if let Some(existing) = &record.credit_score {
            return existing.clone();
        }
        let questionnaire = &record.questionnaire;
        let result = self.alt_model.score(
            &questionnaire.financial_info,
            &questionnaire.additional_info,
            questionnaire.has_pan(),
        );
        debug!(application_id = %record.application_id.0, score = result.score, "credit score computed");
        record.credit_score = Some(result.clone());
        result
    }

    fn ensure_risk_score(&self, record: &mut ApplicationRecord) -> RiskScoreResult {
        if let Some(existing) = &record.risk_score {
            return existing.clone();
        }
        let questionnaire = &record.questionnaire;
        let result = self.risk_model.score(
            &questionnaire.financial_info,
            &questionnaire.additional_info,
            questionnaire.has_pan(),
        );
        debug!(application_id = %record.application_id.0, risk_score = result.risk_score, "risk score computed");
        record.risk_score = Some(result.clone());
        result
    }

    /// Run `operation` against the stored record while holding the
    /// application's lock, persisting the record only when it changed.
    /// Unknown ids fail before a lock entry exists; entries are pruned once
    /// no caller holds them.
    fn with_record<T, F>(
        &self,
        application_id: &ApplicationId,
        operation: F,
    ) -> Result<T, ApplicationServiceError>
    where
        F: FnOnce(&mut ApplicationRecord) -> Result<T, ApplicationServiceError>,
    {
        self.get(application_id)?;

        let lock = self.lock_for(application_id);
        let result = {
            let _held = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.get(application_id).and_then(|original| {
                let mut record = original.clone();
                let value = operation(&mut record)?;
                if record != original {
                    self.repository.update(record)?;
                }
                Ok(value)
            })
        };
        self.release_lock(application_id, lock);
        result
    }

    fn lock_for(&self, application_id: &ApplicationId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(application_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn release_lock(&self, application_id: &ApplicationId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map plus ours: nobody else is waiting on it.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(application_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Quote(#[from] AmortizationError),
    #[error("application is not currently eligible for a loan")]
    NotEligible,
}
