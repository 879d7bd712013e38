//! Rule-based loan ceiling and lender tiering.
//!
//! The ceiling depends only on the ALT-SCORE, the RISK-SCORE and whether the
//! applicant has a bureau credit history. A high risk score overrides any
//! credit score, so a risky applicant never reaches the medium or high tier.

use serde::{Deserialize, Serialize};

use super::bands::{MAX_CREDIT_SCORE, MAX_RISK_SCORE, MIN_CREDIT_SCORE};

const DEFAULT_MEDIUM_TIER_RATIO: f64 = 0.6;

/// Dials for the eligibility ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityConfig {
    pub base_limit_with_history: u64,
    pub base_limit_without_history: u64,
    pub medium_tier_ratio: f64,
    pub low_tier_floor: u64,
    pub rounding_step: u64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            base_limit_with_history: 100_000,
            base_limit_without_history: 50_000,
            medium_tier_ratio: DEFAULT_MEDIUM_TIER_RATIO,
            low_tier_floor: 0,
            rounding_step: 1_000,
        }
    }
}

/// Likelihood bucket shared by the applicant tier and the lender catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanceTier {
    High,
    Medium,
    Low,
}

impl ChanceTier {
    pub const fn label(self) -> &'static str {
        match self {
            ChanceTier::High => "High",
            ChanceTier::Medium => "Medium",
            ChanceTier::Low => "Low",
        }
    }
}

/// Lender surfaced to the applicant along with its approval chance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSuggestion {
    pub name: String,
    pub chance: ChanceTier,
}

/// Static lender reference data grouped by approval chance.
pub const BANK_CATALOG: &[(&str, ChanceTier)] = &[
    ("Ujjivan Small Finance Bank", ChanceTier::High),
    ("Bandhan Bank", ChanceTier::High),
    ("SBI Small Loan", ChanceTier::Medium),
    ("HDFC MicroBiz", ChanceTier::Medium),
    ("ICICI Business Loan", ChanceTier::Low),
];

pub fn banks_for_tier(tier: ChanceTier) -> Vec<BankSuggestion> {
    BANK_CATALOG
        .iter()
        .filter(|(_, chance)| *chance == tier)
        .map(|(name, chance)| BankSuggestion {
            name: (*name).to_string(),
            chance: *chance,
        })
        .collect()
}

/// Ceiling and lender group for an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub max_loan_amount: u64,
    pub tier: ChanceTier,
    pub banks: Vec<BankSuggestion>,
}

impl EligibilityResult {
    /// A zero ceiling means "not currently eligible", not a failure.
    pub fn is_eligible(&self) -> bool {
        self.max_loan_amount > 0
    }

    pub fn summary(&self) -> String {
        if self.is_eligible() {
            format!(
                "eligible for up to {} ({} chance)",
                self.max_loan_amount,
                self.tier.label()
            )
        } else {
            "not currently eligible".to_string()
        }
    }
}

/// Stateless evaluator applying an [`EligibilityConfig`].
#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    config: EligibilityConfig,
}

impl EligibilityPolicy {
    pub fn new(config: EligibilityConfig) -> Self {
        let mut config = config;
        if !(config.medium_tier_ratio.is_finite()
            && config.medium_tier_ratio > 0.0
            && config.medium_tier_ratio <= 1.0)
        {
            config.medium_tier_ratio = DEFAULT_MEDIUM_TIER_RATIO;
        }
        if config.rounding_step == 0 {
            config.rounding_step = 1;
        }

        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn tier_for(&self, credit_score: u16, risk_score: f64) -> ChanceTier {
        let credit = credit_score.clamp(MIN_CREDIT_SCORE, MAX_CREDIT_SCORE);
        let risk = sanitize_risk(risk_score);

        if risk > 6.0 {
            return ChanceTier::Low;
        }
        if credit > 650 && risk < 4.0 {
            return ChanceTier::High;
        }
        if (550..=650).contains(&credit) || (4.0..=6.0).contains(&risk) {
            return ChanceTier::Medium;
        }
        ChanceTier::Low
    }

    pub fn determine(
        &self,
        credit_score: u16,
        risk_score: f64,
        has_credit_history: bool,
    ) -> EligibilityResult {
        let base_limit = if has_credit_history {
            self.config.base_limit_with_history
        } else {
            self.config.base_limit_without_history
        };

        let tier = self.tier_for(credit_score, risk_score);
        let tier_amount = match tier {
            ChanceTier::High => base_limit as f64,
            ChanceTier::Medium => base_limit as f64 * self.config.medium_tier_ratio,
            ChanceTier::Low => self.config.low_tier_floor.min(base_limit) as f64,
        };

        EligibilityResult {
            max_loan_amount: round_to_step(tier_amount, self.config.rounding_step),
            tier,
            banks: banks_for_tier(tier),
        }
    }
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

/// Apply the default policy.
pub fn determine_eligibility(
    credit_score: u16,
    risk_score: f64,
    has_credit_history: bool,
) -> EligibilityResult {
    EligibilityPolicy::default().determine(credit_score, risk_score, has_credit_history)
}

fn sanitize_risk(risk_score: f64) -> f64 {
    if risk_score.is_nan() {
        MAX_RISK_SCORE
    } else {
        risk_score.clamp(0.0, MAX_RISK_SCORE)
    }
}

fn round_to_step(amount: f64, step: u64) -> u64 {
    let step = step as f64;
    ((amount / step).round() * step).max(0.0) as u64
}
