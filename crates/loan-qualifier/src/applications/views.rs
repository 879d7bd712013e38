use serde::Serialize;

use super::domain::ApplicationId;
use super::repository::ApplicationRecord;
use crate::scoring::{
    credit_band, risk_to_visual_percent, score_to_visual_percent, ApplicationCompletion,
    CompletionRubric, CreditBand, CreditScoreResult, EligibilityResult, RiskCategory,
    RiskScoreResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScoreView {
    pub score: u16,
    pub band: CreditBand,
    pub visual_percent: f64,
    pub is_data_sufficient: bool,
}

impl From<&CreditScoreResult> for CreditScoreView {
    fn from(result: &CreditScoreResult) -> Self {
        Self {
            score: result.score,
            band: credit_band(result.score),
            visual_percent: score_to_visual_percent(result.score),
            is_data_sufficient: result.is_data_sufficient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreView {
    pub risk_score: f64,
    pub category: RiskCategory,
    pub visual_percent: f64,
}

impl From<&RiskScoreResult> for RiskScoreView {
    fn from(result: &RiskScoreResult) -> Self {
        Self {
            risk_score: result.risk_score,
            category: result.category,
            visual_percent: risk_to_visual_percent(result.risk_score),
        }
    }
}

/// Read-only summary rendered on the applicant's profile page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub application_id: ApplicationId,
    pub stage: &'static str,
    pub completion: ApplicationCompletion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<CreditScoreView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskScoreView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityResult>,
}

impl ProfileView {
    pub fn from_record(record: &ApplicationRecord, rubric: &CompletionRubric) -> Self {
        Self {
            application_id: record.application_id.clone(),
            stage: record.stage().label(),
            completion: rubric.evaluate_json(&record.questionnaire.completion_document()),
            credit: record.credit_score.as_ref().map(CreditScoreView::from),
            risk: record.risk_score.as_ref().map(RiskScoreView::from),
            eligibility: record.eligibility.clone(),
        }
    }
}
