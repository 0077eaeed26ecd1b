use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::{parse_sql_datetime, sql_datetime, DatabaseError};
use crate::models::enums::ExtractionMethod;
use crate::models::ExtractedField;

const FIELD_COLUMNS: &str = "id, document_id, field_name, field_value, confidence_score,
         manually_verified, verified_by, verified_at, extraction_method, created_at";

pub fn insert_extracted_field(
    conn: &Connection,
    field: &ExtractedField,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO extracted_data (id, document_id, field_name, field_value, confidence_score,
         manually_verified, verified_by, verified_at, extraction_method, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            field.id.to_string(),
            field.document_id.to_string(),
            field.field_name,
            field.field_value,
            field.confidence_score,
            field.manually_verified as i32,
            field.verified_by,
            field.verified_at.as_ref().map(sql_datetime),
            field.extraction_method.as_str(),
            sql_datetime(&field.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_extracted_field(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<ExtractedField>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FIELD_COLUMNS} FROM extracted_data WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_string()], row_to_field);

    match result {
        Ok(row) => Ok(Some(field_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Fields for one document in the order they were scaffolded.
pub fn get_fields_for_document(
    conn: &Connection,
    document_id: &Uuid,
) -> Result<Vec<ExtractedField>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FIELD_COLUMNS} FROM extracted_data WHERE document_id = ?1 ORDER BY rowid"
    ))?;

    let rows = stmt.query_map(params![document_id.to_string()], row_to_field)?;

    let mut fields = Vec::new();
    for row in rows {
        fields.push(field_from_row(row?)?);
    }
    Ok(fields)
}

/// Apply a preparer verification: the new value wins, the field is pinned
/// to full confidence, and the reviewer identity is recorded.
pub fn verify_extracted_field(
    conn: &Connection,
    id: &Uuid,
    field_value: &str,
    verified_by: &str,
    verified_at: &NaiveDateTime,
) -> Result<ExtractedField, DatabaseError> {
    let rows = conn.execute(
        "UPDATE extracted_data SET field_value = ?2, manually_verified = 1,
         confidence_score = 100, verified_by = ?3, verified_at = ?4
         WHERE id = ?1",
        params![
            id.to_string(),
            field_value,
            verified_by,
            sql_datetime(verified_at),
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "ExtractedField".into(),
            id: id.to_string(),
        });
    }

    get_extracted_field(conn, id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "ExtractedField".into(),
        id: id.to_string(),
    })
}

// Internal row type for ExtractedField mapping
struct FieldRow {
    id: String,
    document_id: String,
    field_name: String,
    field_value: Option<String>,
    confidence_score: Option<f64>,
    manually_verified: i32,
    verified_by: Option<String>,
    verified_at: Option<String>,
    extraction_method: String,
    created_at: String,
}

fn row_to_field(row: &rusqlite::Row) -> rusqlite::Result<FieldRow> {
    Ok(FieldRow {
        id: row.get(0)?,
        document_id: row.get(1)?,
        field_name: row.get(2)?,
        field_value: row.get(3)?,
        confidence_score: row.get(4)?,
        manually_verified: row.get(5)?,
        verified_by: row.get(6)?,
        verified_at: row.get(7)?,
        extraction_method: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn field_from_row(row: FieldRow) -> Result<ExtractedField, DatabaseError> {
    Ok(ExtractedField {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        document_id: Uuid::parse_str(&row.document_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        field_name: row.field_name,
        field_value: row.field_value,
        confidence_score: row.confidence_score,
        manually_verified: row.manually_verified != 0,
        verified_by: row.verified_by,
        verified_at: row.verified_at.as_deref().and_then(parse_sql_datetime),
        extraction_method: ExtractionMethod::from_str(&row.extraction_method)?,
        created_at: parse_sql_datetime(&row.created_at).unwrap_or_default(),
    })
}
