use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ExtractionMethod;

/// One structured field scaffolded for a document at intake and filled in
/// (or corrected) by the preparer during review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedField {
    pub id: Uuid,
    pub document_id: Uuid,
    pub field_name: String,
    pub field_value: Option<String>,
    /// 0-100 persisted scale; 100 once manually verified.
    pub confidence_score: Option<f64>,
    pub manually_verified: bool,
    pub verified_by: Option<String>,
    pub verified_at: Option<NaiveDateTime>,
    pub extraction_method: ExtractionMethod,
    pub created_at: NaiveDateTime,
}
