//! Credit bands, risk categories and the meter percentages shown beside them.

use serde::{Deserialize, Serialize};

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 900;
pub const MAX_RISK_SCORE: f64 = 10.0;

/// Default-risk category derived from a 0-10 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

/// Visual band used when rendering an ALT-SCORE on a meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CreditBand {
    pub const fn label(self) -> &'static str {
        match self {
            CreditBand::Poor => "poor",
            CreditBand::Fair => "fair",
            CreditBand::Good => "good",
            CreditBand::Excellent => "excellent",
        }
    }
}

/// `score <= 3` is Low, `(3, 6]` Medium, anything above High.
///
/// NaN falls through every comparison and lands in High.
pub fn classify_risk(score: f64) -> RiskCategory {
    if score <= 3.0 {
        RiskCategory::Low
    } else if score <= 6.0 {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

pub fn credit_band(score: u16) -> CreditBand {
    match score {
        0..=549 => CreditBand::Poor,
        550..=649 => CreditBand::Fair,
        650..=749 => CreditBand::Good,
        _ => CreditBand::Excellent,
    }
}

/// Position of a credit score along the 300-900 scale, clamped to `[0, 100]`.
pub fn score_to_visual_percent(score: u16) -> f64 {
    let span = f64::from(MAX_CREDIT_SCORE - MIN_CREDIT_SCORE);
    let offset = f64::from(score) - f64::from(MIN_CREDIT_SCORE);
    (offset / span * 100.0).clamp(0.0, 100.0)
}

/// Position of a risk score along the 0-10 scale, clamped to `[0, 100]`.
pub fn risk_to_visual_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 100.0;
    }
    (score * (100.0 / MAX_RISK_SCORE)).clamp(0.0, 100.0)
}
