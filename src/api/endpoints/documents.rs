//! Document intake and review endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::classify;
use crate::classify::ClassificationResult;
use crate::db::repository::{get_client, get_document, get_documents_for_client, get_fields_for_document};
use crate::db::timestamp_now;
use crate::fields::field_label;
use crate::models::{Document, ExtractedField};
use crate::pipeline::intake::{intake_document, NewUpload};
use crate::pipeline::review::mark_document_reviewed;

/// Earliest/latest tax years the portal accepts at upload.
const TAX_YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

#[derive(Serialize)]
pub struct UploadResponse {
    pub document: Document,
    pub classification: Option<ClassificationResult>,
    /// e.g. "1099-DIV Dividend Income (High confidence)"; absent when the
    /// uploader chose the type.
    pub classification_description: Option<String>,
    pub fields: Vec<ExtractedField>,
}

/// `POST /api/documents` — register an uploaded file's metadata.
///
/// Classification runs only when the uploader did not pick a type; the
/// expected-field scaffold is created either way.
pub async fn upload(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewUpload>,
) -> Result<Json<UploadResponse>, ApiError> {
    if payload.file_name.trim().is_empty() {
        return Err(ApiError::BadRequest("file_name is required".into()));
    }
    if !TAX_YEAR_RANGE.contains(&payload.tax_year) {
        return Err(ApiError::BadRequest(format!(
            "tax_year {} out of range",
            payload.tax_year
        )));
    }

    let mut conn = ctx.open_db()?;

    get_client(&conn, &payload.client_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {}", payload.client_id)))?;

    let result =
        intake_document(&mut conn, payload, timestamp_now()).map_err(ApiError::from)?;

    let classification_description = result.classification.as_ref().map(classify::describe);

    Ok(Json(UploadResponse {
        document: result.document,
        classification: result.classification,
        classification_description,
        fields: result.fields,
    }))
}

#[derive(Deserialize)]
pub struct DocumentsQuery {
    pub tax_year: Option<i32>,
}

/// `GET /api/clients/:id/documents?tax_year=` — newest first.
pub async fn list_for_client(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Query(query): Query<DocumentsQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let client_id = parse_id(&id)?;
    let conn = ctx.open_db()?;

    get_client(&conn, &client_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {client_id}")))?;

    let documents = get_documents_for_client(&conn, &client_id, query.tax_year)
        .map_err(ApiError::from)?;
    Ok(Json(documents))
}

#[derive(Serialize)]
pub struct FieldView {
    #[serde(flatten)]
    pub field: ExtractedField,
    pub label: String,
}

#[derive(Serialize)]
pub struct DocumentDetailResponse {
    pub document: Document,
    pub fields: Vec<FieldView>,
}

/// `GET /api/documents/:id` — the document plus its field scaffold with
/// display labels, in scaffold order.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DocumentDetailResponse>, ApiError> {
    let document_id = parse_id(&id)?;
    let conn = ctx.open_db()?;

    let document = get_document(&conn, &document_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Document {document_id}")))?;

    let fields = get_fields_for_document(&conn, &document_id)
        .map_err(ApiError::from)?
        .into_iter()
        .map(|field| {
            let label = field_label(&field.field_name);
            FieldView { field, label }
        })
        .collect();

    Ok(Json(DocumentDetailResponse { document, fields }))
}

/// `PUT /api/documents/:id/review` — preparer signs off on the document.
pub async fn review(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let document_id = parse_id(&id)?;
    let conn = ctx.open_db()?;

    let document =
        mark_document_reviewed(&conn, &document_id, timestamp_now()).map_err(ApiError::from)?;
    Ok(Json(document))
}
