use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::DocumentType;

/// An extracted field joined with its document's display context, the
/// summary builder's input row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentField {
    pub id: Uuid,
    pub document_id: Uuid,
    pub field_name: String,
    pub field_value: Option<String>,
    pub manually_verified: bool,
    pub file_name: String,
    pub document_type: DocumentType,
}

/// One line of the rollup. Document-sourced items carry their provenance;
/// client-reported items have neither id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLineItem {
    pub label: String,
    pub amount: f64,
    pub source: String,
    pub verified: bool,
    pub document_id: Option<Uuid>,
    pub field_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeCategory {
    Wages,
    Interest,
    Dividend,
    Business,
    CapitalGains,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithholdingCategory {
    Federal,
    State,
    SocialSecurity,
    Medicare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDependent {
    pub name: String,
    pub relationship: String,
    pub dob: String,
}

/// The categorized, deduplicated rollup for one client and tax year.
/// Recomputed from scratch on every request; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxSummary {
    pub wages_income: Vec<TaxLineItem>,
    pub interest_income: Vec<TaxLineItem>,
    pub dividend_income: Vec<TaxLineItem>,
    pub business_income: Vec<TaxLineItem>,
    pub capital_gains: Vec<TaxLineItem>,
    pub other_income: Vec<TaxLineItem>,
    pub total_income: f64,

    pub federal_withheld: Vec<TaxLineItem>,
    pub state_withheld: Vec<TaxLineItem>,
    /// Raw line items only; callers wanting a single number sum these.
    pub social_security_tax: Vec<TaxLineItem>,
    pub medicare_tax: Vec<TaxLineItem>,
    pub total_federal_withheld: f64,
    pub total_state_withheld: f64,

    pub client_deductions: Vec<TaxLineItem>,
    pub total_client_deductions: f64,

    pub dependents: Vec<SummaryDependent>,
}

impl TaxSummary {
    pub(crate) fn income_bucket_mut(&mut self, category: IncomeCategory) -> &mut Vec<TaxLineItem> {
        match category {
            IncomeCategory::Wages => &mut self.wages_income,
            IncomeCategory::Interest => &mut self.interest_income,
            IncomeCategory::Dividend => &mut self.dividend_income,
            IncomeCategory::Business => &mut self.business_income,
            IncomeCategory::CapitalGains => &mut self.capital_gains,
            IncomeCategory::Other => &mut self.other_income,
        }
    }

    pub(crate) fn withholding_bucket_mut(
        &mut self,
        category: WithholdingCategory,
    ) -> &mut Vec<TaxLineItem> {
        match category {
            WithholdingCategory::Federal => &mut self.federal_withheld,
            WithholdingCategory::State => &mut self.state_withheld,
            WithholdingCategory::SocialSecurity => &mut self.social_security_tax,
            WithholdingCategory::Medicare => &mut self.medicare_tax,
        }
    }

    /// Income buckets with their report headings, in report order.
    pub fn income_sections(&self) -> [(&'static str, &[TaxLineItem]); 6] {
        [
            ("Wages & Salary", self.wages_income.as_slice()),
            ("Interest Income", self.interest_income.as_slice()),
            ("Dividend Income", self.dividend_income.as_slice()),
            ("Business Income", self.business_income.as_slice()),
            ("Capital Gains", self.capital_gains.as_slice()),
            ("Other Income", self.other_income.as_slice()),
        ]
    }
}
