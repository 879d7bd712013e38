use super::common::*;
use crate::applications::domain::{ApplicationId, DocumentRef};
use crate::applications::intake::{IntakeGuard, IntakeViolation};

#[test]
fn accepts_complete_submission_and_trims_identifier() {
    let mut submission = submission();
    submission.applicant_id = "  applicant-001 ".to_string();

    let (id, questionnaire) = IntakeGuard
        .questionnaire_from_submission(submission)
        .expect("valid submission");

    assert_eq!(id, ApplicationId("applicant-001".to_string()));
    assert_eq!(questionnaire.additional_info.credit_score, Some(760));
}

#[test]
fn blank_personal_text_is_dropped() {
    let mut submission = submission();
    submission.personal_info.middle_name = Some("   ".to_string());
    submission.personal_info.first_name = Some(" Meera ".to_string());

    let (_, questionnaire) = IntakeGuard
        .questionnaire_from_submission(submission)
        .expect("valid submission");

    assert_eq!(questionnaire.personal_info.middle_name, None);
    assert_eq!(questionnaire.personal_info.first_name.as_deref(), Some("Meera"));
}

#[test]
fn rejects_missing_applicant_id() {
    let mut submission = submission();
    submission.applicant_id = " ".to_string();

    assert_eq!(
        IntakeGuard.questionnaire_from_submission(submission),
        Err(IntakeViolation::MissingApplicantId)
    );
}

#[test]
fn rejects_out_of_range_bureau_score() {
    let mut submission = submission();
    submission.additional_info.credit_score = Some(950);

    assert_eq!(
        IntakeGuard.questionnaire_from_submission(submission),
        Err(IntakeViolation::CreditScoreOutOfRange {
            min: 300,
            max: 900,
            found: 950,
        })
    );
}

#[test]
fn rejects_bureau_score_without_history() {
    let mut submission = submission();
    submission.additional_info.has_credit_history = Some(false);

    assert_eq!(
        IntakeGuard.questionnaire_from_submission(submission),
        Err(IntakeViolation::CreditScoreWithoutHistory)
    );
}

#[test]
fn rejects_blank_document_keys() {
    let mut submission = submission();
    submission.documents.pan_card = Some(DocumentRef {
        storage_key: "".to_string(),
        verified: None,
    });

    assert_eq!(
        IntakeGuard.questionnaire_from_submission(submission),
        Err(IntakeViolation::BlankDocumentKey {
            document: "panCard"
        })
    );
}
