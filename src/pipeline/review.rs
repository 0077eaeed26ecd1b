use chrono::NaiveDateTime;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{
    get_document, set_document_reviewed, verify_extracted_field,
};
use crate::db::DatabaseError;
use crate::models::{Document, ExtractedField};

/// Apply a preparer's verification to one scaffolded field.
///
/// The edited value is stored with `manually_verified`, full confidence
/// (100 on the persisted scale) and the reviewer identity. Returns the
/// updated row.
pub fn verify_field(
    conn: &Connection,
    field_id: &Uuid,
    field_value: &str,
    verified_by: &str,
    now: NaiveDateTime,
) -> Result<ExtractedField, DatabaseError> {
    let updated = verify_extracted_field(conn, field_id, field_value, verified_by, &now)?;

    tracing::info!(
        field_id = %field_id,
        field_name = %updated.field_name,
        verified_by = %verified_by,
        "Field verified"
    );

    Ok(updated)
}

/// Mark a document's review as finished and return the updated record.
pub fn mark_document_reviewed(
    conn: &Connection,
    document_id: &Uuid,
    now: NaiveDateTime,
) -> Result<Document, DatabaseError> {
    set_document_reviewed(conn, document_id, &now)?;

    let document = get_document(conn, document_id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "Document".into(),
        id: document_id.to_string(),
    })?;

    tracing::info!(document_id = %document_id, "Document review complete");

    Ok(document)
}
