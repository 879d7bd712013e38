//! Equated monthly installment (EMI) arithmetic for amortizing loans.
//!
//! `compute_emi` is the pure calculator; [`LoanSelection`] holds the clamped
//! amount/tenure pair an applicant picks against their eligibility ceiling.

use serde::{Deserialize, Serialize};

/// Annual interest rate applied to every quote unless configuration overrides it.
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 10.0;
pub const MIN_TENURE_MONTHS: u32 = 6;
pub const MAX_TENURE_MONTHS: u32 = 24;
pub const DEFAULT_TENURE_MONTHS: u32 = 12;
/// Amount pre-selected for a fresh quote when the ceiling allows it.
pub const DEFAULT_SELECTION_AMOUNT: u64 = 45_000;

/// Monthly installment and total repayable over the tenure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub emi: f64,
    pub total_repayment: f64,
}

impl EmiBreakdown {
    const ZERO: Self = Self {
        emi: 0.0,
        total_repayment: 0.0,
    };
}

/// Precondition violations for the calculator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmortizationError {
    #[error("principal must be a finite, non-negative amount (found {0})")]
    InvalidPrincipal(f64),
    #[error("annual rate must be a finite, non-negative percentage (found {0})")]
    InvalidRate(f64),
    #[error("tenure must be at least one month")]
    ZeroTenure,
}

/// Compute the EMI for `principal` at `annual_rate_percent` over `tenure_months`.
///
/// With a positive rate the installment is rounded to the nearest whole
/// currency unit and the total repayment is `emi * tenure` rounded. A zero
/// rate divides the principal evenly without rounding.
pub fn compute_emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> Result<EmiBreakdown, AmortizationError> {
    if !principal.is_finite() || principal < 0.0 {
        return Err(AmortizationError::InvalidPrincipal(principal));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(AmortizationError::InvalidRate(annual_rate_percent));
    }
    if tenure_months == 0 {
        return Err(AmortizationError::ZeroTenure);
    }

    if principal == 0.0 {
        return Ok(EmiBreakdown::ZERO);
    }

    let months = f64::from(tenure_months);
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    // (1+r)^-n tends to zero on long tenures, so the installment tends to P*r.
    let discount = (1.0 + monthly_rate).powf(-months);
    if monthly_rate == 0.0 || discount >= 1.0 {
        return Ok(EmiBreakdown {
            emi: principal / months,
            total_repayment: principal,
        });
    }

    let emi = principal * monthly_rate / (1.0 - discount);

    Ok(EmiBreakdown {
        emi: emi.round(),
        total_repayment: (emi * months).round(),
    })
}

/// Amount and tenure chosen against an eligibility ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSelection {
    pub amount: u64,
    pub tenure_months: u32,
}

impl LoanSelection {
    /// Clamp the requested amount into `[0, max_loan_amount]` and the tenure
    /// into the supported month range.
    pub fn clamped(amount: u64, tenure_months: u32, max_loan_amount: u64) -> Self {
        Self {
            amount: amount.min(max_loan_amount),
            tenure_months: tenure_months.clamp(MIN_TENURE_MONTHS, MAX_TENURE_MONTHS),
        }
    }

    /// Starting point offered before the applicant moves any control.
    pub fn initial(max_loan_amount: u64) -> Self {
        Self::clamped(
            DEFAULT_SELECTION_AMOUNT,
            DEFAULT_TENURE_MONTHS,
            max_loan_amount,
        )
    }

    pub fn quote(&self, annual_rate_percent: f64) -> Result<LoanQuote, AmortizationError> {
        let breakdown = compute_emi(self.amount as f64, annual_rate_percent, self.tenure_months)?;
        let total_interest = (breakdown.total_repayment - self.amount as f64).max(0.0);

        Ok(LoanQuote {
            amount: self.amount,
            tenure_months: self.tenure_months,
            annual_rate_percent,
            emi: breakdown.emi,
            total_repayment: breakdown.total_repayment,
            total_interest,
        })
    }
}

/// Priced selection returned to callers rendering a repayment summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub amount: u64,
    pub tenure_months: u32,
    pub annual_rate_percent: f64,
    pub emi: f64,
    pub total_repayment: f64,
    pub total_interest: f64,
}
