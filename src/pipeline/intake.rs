use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::{classify, ClassificationResult};
use crate::db::repository::{insert_document, insert_extracted_field};
use crate::db::DatabaseError;
use crate::fields::{requires_data_entry, seed_fields};
use crate::models::enums::{DocumentStatus, DocumentType};
use crate::models::{Document, ExtractedField};

/// Upload metadata handed over by the portal. The file bytes themselves
/// never pass through here.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUpload {
    pub client_id: Uuid,
    pub file_name: String,
    /// Type chosen by the uploader; when absent the classifier decides.
    pub document_type: Option<DocumentType>,
    pub tax_year: i32,
    pub notes: Option<String>,
}

/// Outcome of one intake: the persisted document, the classification that
/// chose its type (None when the uploader picked one), and the scaffolded
/// field rows.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeResult {
    pub document: Document,
    pub classification: Option<ClassificationResult>,
    pub fields: Vec<ExtractedField>,
}

/// Register an uploaded document: classify it if the uploader did not pick
/// a type, scaffold its expected fields, and persist everything in one
/// transaction.
///
/// Confidences cross from the internal [0,1] scale to the persisted 0-100
/// scale here and nowhere else.
pub fn intake_document(
    conn: &mut Connection,
    upload: NewUpload,
    now: NaiveDateTime,
) -> Result<IntakeResult, DatabaseError> {
    let (document_type, classification) = match upload.document_type {
        Some(doc_type) => (doc_type, None),
        None => {
            let result = classify(&upload.file_name);
            (result.document_type.clone(), Some(result))
        }
    };

    let seeded = seed_fields(&upload.file_name, &document_type);
    let document_id = Uuid::new_v4();

    let document = Document {
        id: document_id,
        client_id: upload.client_id,
        file_name: upload.file_name,
        document_type: document_type.clone(),
        tax_year: upload.tax_year,
        status: DocumentStatus::Uploaded,
        confidence_score: classification.as_ref().map(|c| c.confidence * 100.0),
        requires_review: requires_data_entry(&document_type),
        notes: upload.notes,
        uploaded_at: now,
        processed_at: None,
        reviewed_at: None,
    };

    let fields: Vec<ExtractedField> = seeded
        .into_iter()
        .map(|seed| ExtractedField {
            id: Uuid::new_v4(),
            document_id,
            field_name: seed.field_name.to_string(),
            field_value: seed.field_value,
            confidence_score: Some(seed.confidence * 100.0),
            manually_verified: false,
            verified_by: None,
            verified_at: None,
            extraction_method: seed.extraction_method,
            created_at: now,
        })
        .collect();

    let tx = conn.transaction()?;
    insert_document(&tx, &document)?;
    for field in &fields {
        insert_extracted_field(&tx, field)?;
    }
    tx.commit()?;

    tracing::info!(
        document_id = %document_id,
        file = %document.file_name,
        document_type = document.document_type.as_str(),
        confidence = ?document.confidence_score,
        seeded_fields = fields.len(),
        "Document intake complete"
    );

    Ok(IntakeResult {
        document,
        classification,
        fields,
    })
}
