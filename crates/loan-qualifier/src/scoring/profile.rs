//! Business and credit-history answers the scoring models read.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Retail,
    Service,
    Manufacturing,
    Other,
}

/// How long the business has been trading, in the two bands the scoring uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusinessDuration {
    LessThanFiveYears,
    FiveYearsOrMore,
}

/// Monthly business figures in whole rupees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialProfile {
    pub business_type: Option<BusinessType>,
    pub business_duration: Option<BusinessDuration>,
    pub stock_value: Option<u64>,
    pub monthly_upi_transactions: Option<u64>,
    pub monthly_cash_income: Option<u64>,
    pub monthly_expenses: Option<u64>,
    pub existing_loan: Option<bool>,
}

impl FinancialProfile {
    /// UPI, cash income and expenses are all required for a meaningful score.
    pub fn has_core_figures(&self) -> bool {
        self.monthly_upi_transactions.is_some()
            && self.monthly_cash_income.is_some()
            && self.monthly_expenses.is_some()
    }

    pub fn total_income(&self) -> u64 {
        self.monthly_upi_transactions
            .unwrap_or(0)
            .saturating_add(self.monthly_cash_income.unwrap_or(0))
    }

    pub fn net_income(&self) -> i64 {
        let income = i64::try_from(self.total_income()).unwrap_or(i64::MAX);
        let expenses = i64::try_from(self.monthly_expenses.unwrap_or(0)).unwrap_or(i64::MAX);
        income.saturating_sub(expenses)
    }

    /// Net income as a fraction of total income; `None` without any income.
    pub fn net_margin(&self) -> Option<f64> {
        let income = self.total_income();
        (income > 0).then(|| self.net_income() as f64 / income as f64)
    }

    pub fn upi_share(&self) -> Option<f64> {
        self.share_of_income(self.monthly_upi_transactions.unwrap_or(0))
    }

    pub fn cash_share(&self) -> Option<f64> {
        self.share_of_income(self.monthly_cash_income.unwrap_or(0))
    }

    pub fn is_established(&self) -> bool {
        self.business_duration == Some(BusinessDuration::FiveYearsOrMore)
    }

    pub fn carries_existing_loan(&self) -> bool {
        self.existing_loan.unwrap_or(false)
    }

    fn share_of_income(&self, part: u64) -> Option<f64> {
        let income = self.total_income();
        (income > 0).then(|| part as f64 / income as f64)
    }
}

/// Credit history and asset answers from the third questionnaire step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalProfile {
    pub has_credit_history: Option<bool>,
    pub credit_score: Option<u16>,
    pub owns_house: Option<bool>,
    pub owns_business: Option<bool>,
    pub receives_govt_benefits: Option<bool>,
    pub benefit_type: Option<String>,
}

impl AdditionalProfile {
    pub fn credit_history_on_file(&self) -> bool {
        self.has_credit_history.unwrap_or(false)
    }

    /// Bureau score, only when the applicant reported a credit history.
    pub fn bureau_score(&self) -> Option<u16> {
        if self.credit_history_on_file() {
            self.credit_score
        } else {
            None
        }
    }

    pub fn owns_assets(&self) -> bool {
        self.owns_house.unwrap_or(false) || self.owns_business.unwrap_or(false)
    }
}
