use super::domain::{ApplicationId, PersonalInfo, Questionnaire, QuestionnaireSubmission};
use crate::scoring::bands::{MAX_CREDIT_SCORE, MIN_CREDIT_SCORE};

/// Validation errors raised while accepting a questionnaire.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("submission is missing the applicant id")]
    MissingApplicantId,
    #[error("credit score must be between {min} and {max} (found {found})")]
    CreditScoreOutOfRange { min: u16, max: u16, found: u16 },
    #[error("credit score reported without a credit history")]
    CreditScoreWithoutHistory,
    #[error("document '{document}' has an empty storage key")]
    BlankDocumentKey { document: &'static str },
}

/// Turns raw submissions into stored questionnaires.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn questionnaire_from_submission(
        &self,
        submission: QuestionnaireSubmission,
    ) -> Result<(ApplicationId, Questionnaire), IntakeViolation> {
        let applicant_id = submission.applicant_id.trim();
        if applicant_id.is_empty() {
            return Err(IntakeViolation::MissingApplicantId);
        }

        let additional = &submission.additional_info;
        if let Some(found) = additional.credit_score {
            if additional.has_credit_history != Some(true) {
                return Err(IntakeViolation::CreditScoreWithoutHistory);
            }
            if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&found) {
                return Err(IntakeViolation::CreditScoreOutOfRange {
                    min: MIN_CREDIT_SCORE,
                    max: MAX_CREDIT_SCORE,
                    found,
                });
            }
        }

        let documents = &submission.documents;
        for (document, reference) in [
            ("identityProof", &documents.identity_proof),
            ("panCard", &documents.pan_card),
            ("shopPhoto", &documents.shop_photo),
        ] {
            if let Some(reference) = reference {
                if reference.storage_key.trim().is_empty() {
                    return Err(IntakeViolation::BlankDocumentKey { document });
                }
            }
        }

        let application_id = ApplicationId(applicant_id.to_string());
        let questionnaire = Questionnaire {
            personal_info: sanitize_personal(submission.personal_info),
            financial_info: submission.financial_info,
            additional_info: submission.additional_info,
            documents: submission.documents,
        };

        Ok((application_id, questionnaire))
    }
}

fn sanitize_personal(info: PersonalInfo) -> PersonalInfo {
    PersonalInfo {
        first_name: sanitize_text(info.first_name),
        middle_name: sanitize_text(info.middle_name),
        last_name: sanitize_text(info.last_name),
        gender: sanitize_text(info.gender),
        dob: info.dob,
        email: sanitize_text(info.email),
        phone: sanitize_text(info.phone),
        alt_phone: sanitize_text(info.alt_phone),
        address: sanitize_text(info.address),
    }
}

fn sanitize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
