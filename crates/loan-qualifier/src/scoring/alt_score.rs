//! ALT-SCORE: a 300-900 creditworthiness proxy built from non-bureau signals.
//!
//! Net income dominates. Digital transaction share, bureau history, business
//! age and asset ownership adjust it in smaller steps.

use serde::{Deserialize, Serialize};

use super::bands::{MAX_CREDIT_SCORE, MIN_CREDIT_SCORE};
use super::{top_reasons, ReasonPolarity, ScoreComponent, ScoreFactor, ScoreReason};
use super::profile::{AdditionalProfile, FinancialProfile};

const BASE_SCORE: f64 = 500.0;
const REASON_LIMIT: usize = 4;

/// Cached ALT-SCORE for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScoreResult {
    pub score: u16,
    pub is_data_sufficient: bool,
    pub components: Vec<ScoreComponent>,
    pub reasons: Vec<ScoreReason>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AltScoreModel;

impl AltScoreModel {
    /// `has_pan` only steers the tips; it never moves the score.
    pub fn score(
        &self,
        financial: &FinancialProfile,
        additional: &AdditionalProfile,
        has_pan: bool,
    ) -> CreditScoreResult {
        let mut components = Vec::new();

        let net_income = financial.net_income();
        let margin = financial.net_margin().unwrap_or(0.0);
        if net_income < 0 {
            components.push(component(ScoreFactor::Profitability, -150.0, "lowProfit"));
        } else if margin >= 0.30 {
            components.push(component(ScoreFactor::Profitability, 200.0, "highProfit"));
        } else if margin >= 0.15 {
            components.push(component(ScoreFactor::Profitability, 150.0, "highProfit"));
        } else if margin > 0.05 {
            components.push(component(ScoreFactor::Profitability, 100.0, "highProfit"));
        } else {
            components.push(component(ScoreFactor::Profitability, 0.0, "lowProfit"));
        }

        let upi_share = financial.upi_share().unwrap_or(0.0);
        if upi_share >= 0.6 {
            components.push(component(ScoreFactor::DigitalTransactions, 50.0, "highUpi"));
        }
        if financial.cash_share().unwrap_or(0.0) >= 0.7 {
            components.push(component(ScoreFactor::CashDependency, -50.0, "highCash"));
        }

        match additional.bureau_score() {
            Some(score) if score > 700 => {
                components.push(component(ScoreFactor::CreditHistory, 150.0, "goodCibil"));
            }
            Some(score) if score < 600 => {
                components.push(component(ScoreFactor::CreditHistory, -150.0, "lowCibil"));
            }
            _ => {}
        }

        if financial.is_established() {
            components.push(component(ScoreFactor::BusinessDuration, 40.0, "longDuration"));
        } else {
            components.push(component(ScoreFactor::BusinessDuration, -20.0, "shortDuration"));
        }

        if additional.owns_house.unwrap_or(false) {
            components.push(component(ScoreFactor::AssetOwnership, 25.0, "ownsAssets"));
        }
        if additional.owns_business.unwrap_or(false) {
            components.push(component(ScoreFactor::AssetOwnership, 25.0, "ownsAssets"));
        }
        if !additional.owns_assets() {
            components.push(component(ScoreFactor::AssetOwnership, -20.0, "noAssets"));
        }

        if financial.carries_existing_loan() {
            components.push(component(ScoreFactor::ExistingLoan, -20.0, "existingLoan"));
        }
        if additional.receives_govt_benefits.unwrap_or(false) {
            components.push(component(ScoreFactor::GovtBenefits, 10.0, "govtBenefits"));
        }

        let raw: f64 = BASE_SCORE + components.iter().map(|c| c.impact).sum::<f64>();
        let score = raw
            .round()
            .clamp(f64::from(MIN_CREDIT_SCORE), f64::from(MAX_CREDIT_SCORE)) as u16;

        let is_data_sufficient = financial.has_core_figures();
        let mut tips = Vec::new();
        if !is_data_sufficient {
            tips.push(tip("complete"));
        }
        if upi_share < 0.6 {
            tips.push(tip("upi"));
        }
        if additional.bureau_score().map_or(true, |score| score < 600) {
            tips.push(tip("cibil"));
        }
        if !has_pan {
            tips.push(tip("pan"));
        }
        if net_income <= 0 {
            tips.push(tip("cashflow"));
        }

        CreditScoreResult {
            score,
            is_data_sufficient,
            reasons: top_reasons(&components, REASON_LIMIT),
            components,
            tips,
        }
    }
}

fn component(factor: ScoreFactor, impact: f64, key: &str) -> ScoreComponent {
    let polarity = if impact > 0.0 {
        ReasonPolarity::Positive
    } else {
        ReasonPolarity::Negative
    };
    let direction = match polarity {
        ReasonPolarity::Positive => "positive",
        ReasonPolarity::Negative => "negative",
    };

    ScoreComponent {
        factor,
        impact,
        reason: ScoreReason {
            key: format!("altScore.reasons.{direction}.{key}"),
            polarity,
        },
    }
}

fn tip(key: &str) -> String {
    format!("altScore.tips.{key}")
}
