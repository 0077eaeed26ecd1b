use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::repository::get_client_tax_info;
use crate::db::DatabaseError;
use crate::models::enums::DocumentType;

use super::builder::build_summary;
use super::types::{DocumentField, TaxSummary};

/// Fetch every extracted field for the client's documents in one tax year,
/// joined with document display context, in scaffold order.
pub fn fetch_summary_inputs(
    conn: &Connection,
    client_id: &Uuid,
    tax_year: i32,
) -> Result<Vec<DocumentField>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT e.id, e.document_id, e.field_name, e.field_value, e.manually_verified,
                d.file_name, d.document_type
         FROM extracted_data e
         JOIN documents d ON d.id = e.document_id
         WHERE d.client_id = ?1 AND d.tax_year = ?2
         ORDER BY d.uploaded_at, d.rowid, e.rowid",
    )?;

    let rows = stmt.query_map(params![client_id.to_string(), tax_year], |row| {
        Ok(DocumentFieldRow {
            id: row.get(0)?,
            document_id: row.get(1)?,
            field_name: row.get(2)?,
            field_value: row.get(3)?,
            manually_verified: row.get(4)?,
            file_name: row.get(5)?,
            document_type: row.get(6)?,
        })
    })?;

    let mut fields = Vec::new();
    for row in rows {
        fields.push(document_field_from_row(row?)?);
    }
    Ok(fields)
}

/// Assemble the full rollup: extracted fields plus the client's
/// self-reported blob, fed through the pure builder.
pub fn summary_for_client(
    conn: &Connection,
    client_id: &Uuid,
    tax_year: i32,
) -> Result<TaxSummary, DatabaseError> {
    let fields = fetch_summary_inputs(conn, client_id, tax_year)?;
    let tax_info = get_client_tax_info(conn, client_id)?;

    tracing::debug!(
        client_id = %client_id,
        tax_year,
        field_count = fields.len(),
        has_client_info = tax_info.is_some(),
        "Building tax summary"
    );

    Ok(build_summary(&fields, tax_info.as_ref()))
}

struct DocumentFieldRow {
    id: String,
    document_id: String,
    field_name: String,
    field_value: Option<String>,
    manually_verified: i32,
    file_name: String,
    document_type: String,
}

fn document_field_from_row(row: DocumentFieldRow) -> Result<DocumentField, DatabaseError> {
    Ok(DocumentField {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        document_id: Uuid::parse_str(&row.document_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        field_name: row.field_name,
        field_value: row.field_value,
        manually_verified: row.manually_verified != 0,
        file_name: row.file_name,
        document_type: DocumentType::from_str(&row.document_type)?,
    })
}
