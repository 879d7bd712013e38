use crate::infra::InMemoryApplicationRepository;
use chrono::NaiveDate;
use clap::Args;
use loan_qualifier::applications::{
    AdditionalProfile, ApplicationRepository, BusinessDuration, BusinessType, DocumentRef,
    DocumentSet, FinancialProfile, LoanApplicationService, PersonalInfo, QuestionnaireSubmission,
    QuoteRequest,
};
use loan_qualifier::config::{AppConfig, LendingConfig};
use loan_qualifier::error::AppError;
use loan_qualifier::scoring::{
    classify_risk, compute_emi, credit_band, EligibilityPolicy, EligibilityResult,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EmiArgs {
    /// Loan principal in rupees
    #[arg(long)]
    pub(crate) principal: f64,
    /// Annual interest rate in percent (defaults to LOAN_ANNUAL_RATE_PERCENT)
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    /// Repayment tenure in months
    #[arg(long, default_value_t = 12)]
    pub(crate) tenure: u32,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Credit score on the 300-900 scale
    #[arg(long)]
    pub(crate) credit_score: u16,
    /// Risk score on the 0-10 scale
    #[arg(long)]
    pub(crate) risk_score: f64,
    /// Applicant has a bureau credit history
    #[arg(long)]
    pub(crate) has_credit_history: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Requested loan amount for the quote (defaults to the initial selection)
    #[arg(long)]
    pub(crate) amount: Option<u64>,
    /// Requested tenure in months for the quote (clamped to 6-24)
    #[arg(long)]
    pub(crate) tenure: Option<u32>,
}

pub(crate) fn run_emi(args: EmiArgs) -> Result<(), AppError> {
    let EmiArgs {
        principal,
        rate,
        tenure,
    } = args;
    let rate = resolve_rate(rate, || Ok(AppConfig::load()?.lending))?;

    let breakdown = compute_emi(principal, rate, tenure)?;
    println!("EMI calculation");
    println!("- Principal: {}", rupees(principal));
    println!("- Rate: {rate}% p.a. over {tenure} months");
    println!("- Monthly instalment: {}", rupees(breakdown.emi));
    println!("- Total repayment: {}", rupees(breakdown.total_repayment));
    println!(
        "- Total interest: {}",
        rupees((breakdown.total_repayment - principal).max(0.0))
    );
    Ok(())
}

/// An explicit `--rate` wins; otherwise the configured lending rate applies.
fn resolve_rate<F>(requested: Option<f64>, lending: F) -> Result<f64, AppError>
where
    F: FnOnce() -> Result<LendingConfig, AppError>,
{
    match requested {
        Some(rate) => Ok(rate),
        None => Ok(lending()?.annual_rate_percent),
    }
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let lending = AppConfig::load()?.lending;
    let policy = EligibilityPolicy::new(lending.eligibility);
    let result = policy.determine(args.credit_score, args.risk_score, args.has_credit_history);

    println!("Eligibility assessment");
    println!(
        "- Credit score {} ({:?}), risk score {:.1} ({:?})",
        args.credit_score,
        credit_band(args.credit_score),
        args.risk_score,
        classify_risk(args.risk_score)
    );
    render_eligibility(&result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let lending = AppConfig::load()?.lending;

    println!("Loan qualification demo (contact details redacted)");
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let service = LoanApplicationService::new(repository.clone(), lending);

    let record = service.submit(demo_submission())?;
    let id = record.application_id.clone();
    println!("- Received application {} -> {}", id.0, record.stage().label());

    match service.profile(&id) {
        Ok(profile) => {
            println!("  Questionnaire completion: {}%", profile.completion.percentage);
            for section in &profile.completion.sections {
                println!(
                    "    - {}: {}/{} fields (weight {})",
                    section.section, section.filled, section.total, section.weight
                );
            }
        }
        Err(err) => println!("  Profile unavailable: {}", err),
    }

    let credit = service.credit_score(&id)?;
    println!(
        "  ALT-SCORE: {} ({:?}{})",
        credit.score,
        credit_band(credit.score),
        if credit.is_data_sufficient {
            ""
        } else {
            ", partial data"
        }
    );
    for component in &credit.components {
        println!("    - {:?}: {:+.0}", component.factor, component.impact);
    }

    match service.risk_score(&id) {
        Ok(risk) => println!("  RISK-SCORE: {:.1} ({})", risk.risk_score, risk.category.label()),
        Err(err) => println!("  Risk scoring unavailable: {}", err),
    }

    let eligibility = service.eligibility(&id)?;
    render_eligibility(&eligibility);

    let request = QuoteRequest {
        amount: args.amount,
        tenure_months: args.tenure,
    };
    match service.quote(&id, request) {
        Ok(quote) => {
            println!(
                "  Quote: {} over {} months at {}% -> EMI {}, total {}",
                rupees(quote.amount as f64),
                quote.tenure_months,
                quote.annual_rate_percent,
                rupees(quote.emi),
                rupees(quote.total_repayment)
            );
        }
        Err(err) => println!("  Quote unavailable: {}", err),
    }

    let stored_view = match repository.fetch(&id) {
        Ok(Some(record)) => record.status_view(),
        Ok(None) => {
            println!("  Repository lookup returned no record");
            return Ok(());
        }
        Err(err) => {
            println!("  Repository unavailable: {}", err);
            return Ok(());
        }
    };
    match serde_json::to_string_pretty(&stored_view) {
        Ok(json) => println!("  Public status payload:\n{}", json),
        Err(err) => println!("  Public status payload unavailable: {}", err),
    }

    Ok(())
}

fn render_eligibility(result: &EligibilityResult) {
    println!(
        "- Maximum loan: {} ({} chance)",
        rupees(result.max_loan_amount as f64),
        result.tier.label()
    );
    if result.banks.is_empty() {
        println!("  Suggested lenders: none");
    } else {
        println!("  Suggested lenders:");
        for bank in &result.banks {
            println!("    - {} ({})", bank.name, bank.chance.label());
        }
    }
}

fn rupees(amount: f64) -> String {
    format!("₹{:.0}", amount)
}

fn demo_submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        applicant_id: "demo-applicant".to_string(),
        personal_info: PersonalInfo {
            first_name: Some("Demo".to_string()),
            last_name: Some("Applicant".to_string()),
            gender: Some("prefer not to say".to_string()),
            dob: NaiveDate::from_ymd_opt(1990, 1, 15),
            phone: Some("0000000000".to_string()),
            address: Some("Redacted".to_string()),
            ..PersonalInfo::default()
        },
        financial_info: FinancialProfile {
            business_type: Some(BusinessType::Retail),
            business_duration: Some(BusinessDuration::FiveYearsOrMore),
            stock_value: Some(60_000),
            monthly_upi_transactions: Some(45_000),
            monthly_cash_income: Some(25_000),
            monthly_expenses: Some(52_000),
            existing_loan: Some(false),
        },
        additional_info: AdditionalProfile {
            has_credit_history: Some(true),
            credit_score: Some(680),
            owns_house: Some(false),
            owns_business: Some(true),
            receives_govt_benefits: Some(false),
            benefit_type: None,
        },
        documents: DocumentSet {
            identity_proof: Some(DocumentRef {
                storage_key: "demo/identity.jpg".to_string(),
                verified: Some(true),
            }),
            pan_card: None,
            shop_photo: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_qualifier::config::ConfigError;

    #[test]
    fn rupees_drops_fractions() {
        assert_eq!(rupees(3_956.4), "₹3956");
        assert_eq!(rupees(0.0), "₹0");
    }

    #[test]
    fn emi_rate_falls_back_to_configured_lending_rate() {
        let configured = || -> Result<LendingConfig, AppError> {
            Ok(LendingConfig {
                annual_rate_percent: 12.0,
                ..LendingConfig::default()
            })
        };
        assert_eq!(resolve_rate(None, configured).expect("configured"), 12.0);
        assert_eq!(resolve_rate(Some(9.5), configured).expect("explicit"), 9.5);

        let broken = || -> Result<LendingConfig, AppError> {
            Err(ConfigError::InvalidRate("twelve".to_string()).into())
        };
        assert!(resolve_rate(None, broken).is_err());
        assert_eq!(resolve_rate(Some(10.0), broken).expect("explicit"), 10.0);
    }

    #[test]
    fn demo_submission_passes_intake() {
        let service = LoanApplicationService::new(
            Arc::new(InMemoryApplicationRepository::default()),
            LendingConfig::default(),
        );
        let record = service.submit(demo_submission()).expect("demo applicant accepted");
        let eligibility = service
            .eligibility(&record.application_id)
            .expect("demo applicant assessed");
        assert!(eligibility.is_eligible());
    }
}
