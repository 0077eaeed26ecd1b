use serde::{Deserialize, Serialize};

/// Client-entered tax information for the active year.
///
/// Amounts stay strings end to end: entries come from free-form portal
/// inputs and are only interpreted (tolerantly) by the summary builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientTaxInfo {
    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,
    #[serde(default)]
    pub deductions: Vec<DeductionEntry>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    /// Loose category tag chosen by the client (e.g. "w2_wages",
    /// "1099_int", "business"). Unrecognized tags roll up as other income.
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionEntry {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependent {
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub date_of_birth: String,
}
