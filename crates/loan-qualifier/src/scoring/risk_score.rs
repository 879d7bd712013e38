//! RISK-SCORE: 0 (very safe) to 10 (very risky) default-risk estimate.

use serde::{Deserialize, Serialize};

use super::bands::{classify_risk, RiskCategory, MAX_RISK_SCORE};
use super::{top_reasons, ReasonPolarity, ScoreComponent, ScoreFactor, ScoreReason};
use super::profile::{AdditionalProfile, FinancialProfile};

const BASE_RISK: f64 = 2.0;
const THIN_MARGIN: f64 = 0.10;
const CASH_DEPENDENCY_THRESHOLD: f64 = 0.6;
const LOW_STOCK_VALUE: u64 = 10_000;
const REASON_LIMIT: usize = 4;

/// Cached RISK-SCORE; `category` is always `classify_risk(risk_score)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreResult {
    pub risk_score: f64,
    pub category: RiskCategory,
    pub components: Vec<ScoreComponent>,
    pub reasons: Vec<ScoreReason>,
    pub tips: Vec<String>,
}

impl RiskScoreResult {
    pub fn from_score(risk_score: f64) -> Self {
        Self {
            risk_score,
            category: classify_risk(risk_score),
            components: Vec::new(),
            reasons: Vec::new(),
            tips: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScoreModel;

impl RiskScoreModel {
    pub fn score(
        &self,
        financial: &FinancialProfile,
        additional: &AdditionalProfile,
        has_pan: bool,
    ) -> RiskScoreResult {
        let mut components = Vec::new();

        if financial.net_income() < 0 {
            components.push(component(ScoreFactor::Profitability, 4.0, "cashflow"));
        } else if financial.net_margin().unwrap_or(0.0) < THIN_MARGIN {
            components.push(component(ScoreFactor::Profitability, 1.5, "cashflow"));
        }

        let cash_share = financial.cash_share().unwrap_or(0.0);
        if cash_share > CASH_DEPENDENCY_THRESHOLD {
            components.push(component(ScoreFactor::CashDependency, 1.5, "cash"));
        }
        if financial.carries_existing_loan() {
            components.push(component(ScoreFactor::ExistingLoan, 1.0, "loan"));
        }
        if !financial.is_established() {
            components.push(component(ScoreFactor::BusinessDuration, 1.0, "duration"));
        }
        if !additional.credit_history_on_file() {
            components.push(component(ScoreFactor::CreditHistory, 0.75, "cibil"));
        }
        if !additional.owns_assets() {
            components.push(component(ScoreFactor::AssetOwnership, 0.75, "assets"));
        }
        if financial.stock_value.unwrap_or(0) < LOW_STOCK_VALUE {
            components.push(component(ScoreFactor::StockValue, 0.5, "stock"));
        }

        let raw = BASE_RISK + components.iter().map(|c| c.impact).sum::<f64>();
        let risk_score = (raw.clamp(0.0, MAX_RISK_SCORE) * 10.0).round() / 10.0;

        let mut tips = Vec::new();
        if cash_share > 0.4 || financial.upi_share().is_none() {
            tips.push("riskScore.tips.upi".to_string());
        }
        if financial.carries_existing_loan() {
            tips.push("riskScore.tips.repay".to_string());
        }
        if !has_pan {
            tips.push("riskScore.tips.pan".to_string());
        }

        RiskScoreResult {
            risk_score,
            category: classify_risk(risk_score),
            reasons: top_reasons(&components, REASON_LIMIT),
            components,
            tips,
        }
    }
}

fn component(factor: ScoreFactor, impact: f64, key: &str) -> ScoreComponent {
    ScoreComponent {
        factor,
        impact,
        reason: ScoreReason {
            key: format!("riskScore.reasons.{key}"),
            polarity: ReasonPolarity::Negative,
        },
    }
}
