use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DocumentStatus, DocumentType};

/// One uploaded tax document. The file bytes live in external storage;
/// this record carries intake metadata and the classification outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub client_id: Uuid,
    pub file_name: String,
    pub document_type: DocumentType,
    pub tax_year: i32,
    pub status: DocumentStatus,
    /// Classifier confidence on the persisted 0-100 scale.
    /// None when the uploader chose the type themselves.
    pub confidence_score: Option<f64>,
    pub requires_review: bool,
    pub notes: Option<String>,
    pub uploaded_at: NaiveDateTime,
    pub processed_at: Option<NaiveDateTime>,
    pub reviewed_at: Option<NaiveDateTime>,
}
