use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::{parse_sql_datetime, sql_datetime, DatabaseError};
use crate::models::enums::{DocumentStatus, DocumentType};
use crate::models::Document;

const DOCUMENT_COLUMNS: &str = "id, client_id, file_name, document_type, tax_year, status,
         confidence_score, requires_review, notes, uploaded_at, processed_at, reviewed_at";

pub fn insert_document(conn: &Connection, doc: &Document) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO documents (id, client_id, file_name, document_type, tax_year, status,
         confidence_score, requires_review, notes, uploaded_at, processed_at, reviewed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            doc.id.to_string(),
            doc.client_id.to_string(),
            doc.file_name,
            doc.document_type.as_str(),
            doc.tax_year,
            doc.status.as_str(),
            doc.confidence_score,
            doc.requires_review as i32,
            doc.notes,
            sql_datetime(&doc.uploaded_at),
            doc.processed_at.as_ref().map(sql_datetime),
            doc.reviewed_at.as_ref().map(sql_datetime),
        ],
    )?;
    Ok(())
}

pub fn get_document(conn: &Connection, id: &Uuid) -> Result<Option<Document>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_string()], row_to_document);

    match result {
        Ok(row) => Ok(Some(document_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All documents for a client, optionally restricted to one tax year,
/// newest upload first.
pub fn get_documents_for_client(
    conn: &Connection,
    client_id: &Uuid,
    tax_year: Option<i32>,
) -> Result<Vec<Document>, DatabaseError> {
    let mut sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE client_id = ?1");
    if tax_year.is_some() {
        sql.push_str(" AND tax_year = ?2");
    }
    sql.push_str(" ORDER BY uploaded_at DESC, rowid DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows: Vec<DocumentRow> = match tax_year {
        Some(year) => stmt
            .query_map(params![client_id.to_string(), year], row_to_document)?
            .collect::<Result<_, _>>()?,
        None => stmt
            .query_map(params![client_id.to_string()], row_to_document)?
            .collect::<Result<_, _>>()?,
    };

    let mut docs = Vec::new();
    for row in rows {
        docs.push(document_from_row(row)?);
    }
    Ok(docs)
}

/// Mark a document as reviewed by the preparer.
pub fn set_document_reviewed(
    conn: &Connection,
    id: &Uuid,
    reviewed_at: &NaiveDateTime,
) -> Result<(), DatabaseError> {
    let rows = conn.execute(
        "UPDATE documents SET status = ?2, reviewed_at = ?3 WHERE id = ?1",
        params![
            id.to_string(),
            DocumentStatus::Reviewed.as_str(),
            sql_datetime(reviewed_at),
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Document".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// Internal row type for Document mapping
struct DocumentRow {
    id: String,
    client_id: String,
    file_name: String,
    document_type: String,
    tax_year: i32,
    status: String,
    confidence_score: Option<f64>,
    requires_review: i32,
    notes: Option<String>,
    uploaded_at: String,
    processed_at: Option<String>,
    reviewed_at: Option<String>,
}

fn row_to_document(row: &rusqlite::Row) -> rusqlite::Result<DocumentRow> {
    Ok(DocumentRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        file_name: row.get(2)?,
        document_type: row.get(3)?,
        tax_year: row.get(4)?,
        status: row.get(5)?,
        confidence_score: row.get(6)?,
        requires_review: row.get(7)?,
        notes: row.get(8)?,
        uploaded_at: row.get(9)?,
        processed_at: row.get(10)?,
        reviewed_at: row.get(11)?,
    })
}

fn document_from_row(row: DocumentRow) -> Result<Document, DatabaseError> {
    Ok(Document {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        client_id: Uuid::parse_str(&row.client_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        file_name: row.file_name,
        document_type: DocumentType::from_str(&row.document_type)?,
        tax_year: row.tax_year,
        status: DocumentStatus::from_str(&row.status)?,
        confidence_score: row.confidence_score,
        requires_review: row.requires_review != 0,
        notes: row.notes,
        uploaded_at: parse_sql_datetime(&row.uploaded_at).unwrap_or_default(),
        processed_at: row.processed_at.as_deref().and_then(parse_sql_datetime),
        reviewed_at: row.reviewed_at.as_deref().and_then(parse_sql_datetime),
    })
}
