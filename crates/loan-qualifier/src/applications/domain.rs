use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::scoring::profile::{
    AdditionalProfile, BusinessDuration, BusinessType, FinancialProfile,
};

/// Identifier wrapper for loan applications; one application per applicant account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Contact and identity answers from the first questionnaire step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub address: Option<String>,
}

/// Pointer to an uploaded document held by the external document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub storage_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentSet {
    pub identity_proof: Option<DocumentRef>,
    pub pan_card: Option<DocumentRef>,
    pub shop_photo: Option<DocumentRef>,
}

/// Payload posted when the applicant finishes the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireSubmission {
    pub applicant_id: String,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub financial_info: FinancialProfile,
    #[serde(default)]
    pub additional_info: AdditionalProfile,
    #[serde(default)]
    pub documents: DocumentSet,
}

/// Stored questionnaire answers; immutable once accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub personal_info: PersonalInfo,
    pub financial_info: FinancialProfile,
    pub additional_info: AdditionalProfile,
    pub documents: DocumentSet,
}

impl Questionnaire {
    pub fn has_pan(&self) -> bool {
        self.documents.pan_card.is_some()
    }

    /// Section-keyed JSON view consumed by the completion rubric.
    pub fn completion_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Coarse progress of an application through scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStage {
    Submitted,
    Scored,
    Assessed,
}

impl ApplicationStage {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStage::Submitted => "submitted",
            ApplicationStage::Scored => "scored",
            ApplicationStage::Assessed => "assessed",
        }
    }
}
