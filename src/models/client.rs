use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::FilingStatus;
use super::tax_info::ClientTaxInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub filing_status: Option<FilingStatus>,
    /// Self-reported income/deduction/dependent entries for the active
    /// tax year. Merged into the tax summary at build time only.
    pub tax_info: Option<ClientTaxInfo>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
