//! Weighted completion percentage for a stored questionnaire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One questionnaire section and the fields it must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSection {
    pub key: String,
    pub fields: Vec<String>,
    pub weight: u32,
}

impl CompletionSection {
    pub fn new(key: &str, fields: &[&str], weight: u32) -> Self {
        Self {
            key: key.to_string(),
            fields: fields.iter().map(|field| (*field).to_string()).collect(),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("section weights must sum to 100 (found {found})")]
    WeightTotal { found: u32 },
    #[error("section '{section}' lists no fields")]
    EmptySection { section: String },
}

/// Per-section tally reported alongside the overall percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgress {
    pub section: String,
    pub filled: usize,
    pub total: usize,
    pub weight: u32,
    pub contribution: f64,
}

/// Derived on read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCompletion {
    pub percentage: u8,
    pub sections: Vec<SectionProgress>,
}

impl ApplicationCompletion {
    pub fn is_complete(&self) -> bool {
        self.percentage >= 100
    }
}

/// Validated set of sections whose weights sum to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRubric {
    sections: Vec<CompletionSection>,
}

impl CompletionRubric {
    pub fn new(sections: Vec<CompletionSection>) -> Result<Self, CompletionError> {
        if let Some(empty) = sections.iter().find(|section| section.fields.is_empty()) {
            return Err(CompletionError::EmptySection {
                section: empty.key.clone(),
            });
        }

        let found: u32 = sections.iter().map(|section| section.weight).sum();
        if found != 100 {
            return Err(CompletionError::WeightTotal { found });
        }

        Ok(Self { sections })
    }

    /// personalInfo 25, financialInfo 35, additionalInfo 20, documents 20.
    pub fn standard() -> Self {
        Self {
            sections: vec![
                CompletionSection::new(
                    "personalInfo",
                    &["firstName", "lastName", "gender", "dob", "phone", "address"],
                    25,
                ),
                CompletionSection::new(
                    "financialInfo",
                    &[
                        "businessType",
                        "businessDuration",
                        "stockValue",
                        "monthlyUpiTransactions",
                        "monthlyCashIncome",
                        "monthlyExpenses",
                        "existingLoan",
                    ],
                    35,
                ),
                CompletionSection::new(
                    "additionalInfo",
                    &["hasCreditHistory", "ownsHouse", "ownsBusiness", "receivesGovtBenefits"],
                    20,
                ),
                CompletionSection::new("documents", &["identityProof", "shopPhoto"], 20),
            ],
        }
    }

    pub fn sections(&self) -> &[CompletionSection] {
        &self.sections
    }

    pub fn evaluate<P>(&self, presence: P) -> ApplicationCompletion
    where
        P: Fn(&CompletionSection, &str) -> bool,
    {
        let sections: Vec<SectionProgress> = self
            .sections
            .iter()
            .map(|section| section_progress(section, &presence))
            .collect();
        let total: f64 = sections.iter().map(|progress| progress.contribution).sum();

        ApplicationCompletion {
            percentage: to_percentage(total),
            sections,
        }
    }

    /// Evaluate a JSON document shaped `{ "<section>": { "<field>": value } }`.
    pub fn evaluate_json(&self, document: &Value) -> ApplicationCompletion {
        self.evaluate(json_presence(document))
    }
}

impl Default for CompletionRubric {
    fn default() -> Self {
        Self::standard()
    }
}

/// Sum of `weight * filled / total` over `sections`, rounded to an integer
/// percentage. A section the presence check knows nothing about contributes 0.
pub fn compute_completion<P>(sections: &[CompletionSection], presence: P) -> u8
where
    P: Fn(&CompletionSection, &str) -> bool,
{
    let total: f64 = sections
        .iter()
        .map(|section| section_progress(section, &presence).contribution)
        .sum();
    to_percentage(total)
}

/// Null, missing and empty strings are absent; `false` and `0` are answers.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

pub fn json_presence(document: &Value) -> impl Fn(&CompletionSection, &str) -> bool + '_ {
    move |section: &CompletionSection, field: &str| {
        is_present(document.get(&section.key).and_then(|data| data.get(field)))
    }
}

fn section_progress<P>(section: &CompletionSection, presence: &P) -> SectionProgress
where
    P: Fn(&CompletionSection, &str) -> bool,
{
    let total = section.fields.len();
    let filled = section
        .fields
        .iter()
        .filter(|field| presence(section, field.as_str()))
        .count();
    let contribution = if total == 0 {
        0.0
    } else {
        f64::from(section.weight) * filled as f64 / total as f64
    };

    SectionProgress {
        section: section.key.clone(),
        filled,
        total,
        weight: section.weight,
        contribution,
    }
}

fn to_percentage(total: f64) -> u8 {
    total.round().clamp(0.0, 100.0) as u8
}
