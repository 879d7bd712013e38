//! Deterministic scoring primitives.
//!
//! Everything in this module is pure and synchronous: the calculators take
//! plain values, never touch storage, and may be called concurrently.

pub mod alt_score;
pub mod amortization;
pub mod bands;
pub mod completion;
pub mod eligibility;
pub mod profile;
pub mod risk_score;

pub use alt_score::{AltScoreModel, CreditScoreResult};
pub use amortization::{
    compute_emi, AmortizationError, EmiBreakdown, LoanQuote, LoanSelection,
    DEFAULT_ANNUAL_RATE_PERCENT,
};
pub use bands::{
    classify_risk, credit_band, risk_to_visual_percent, score_to_visual_percent, CreditBand,
    RiskCategory,
};
pub use completion::{
    compute_completion, ApplicationCompletion, CompletionError, CompletionRubric,
    CompletionSection, SectionProgress,
};
pub use eligibility::{
    determine_eligibility, BankSuggestion, ChanceTier, EligibilityConfig, EligibilityPolicy,
    EligibilityResult,
};
pub use profile::{AdditionalProfile, BusinessDuration, BusinessType, FinancialProfile};
pub use risk_score::{RiskScoreModel, RiskScoreResult};

use serde::{Deserialize, Serialize};

/// Applicant signals the heuristic models weigh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreFactor {
    Profitability,
    DigitalTransactions,
    CashDependency,
    CreditHistory,
    BusinessDuration,
    AssetOwnership,
    ExistingLoan,
    GovtBenefits,
    StockValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasonPolarity {
    Positive,
    Negative,
}

/// Localization key explaining a score, tagged with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReason {
    pub key: String,
    #[serde(rename = "type")]
    pub polarity: ReasonPolarity,
}

/// Discrete contribution to a score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub impact: f64,
    pub reason: ScoreReason,
}

/// The `limit` components with the largest absolute impact, as reasons.
/// Ties keep their original order.
pub(crate) fn top_reasons(components: &[ScoreComponent], limit: usize) -> Vec<ScoreReason> {
    let mut ranked: Vec<&ScoreComponent> = components.iter().collect();
    ranked.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));

    let mut reasons: Vec<ScoreReason> = Vec::with_capacity(limit);
    for component in ranked {
        if reasons.len() == limit {
            break;
        }
        if !reasons.contains(&component.reason) {
            reasons.push(component.reason.clone());
        }
    }
    reasons
}
