//! Extracted-field verification endpoint.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::timestamp_now;
use crate::models::ExtractedField;
use crate::pipeline::review::verify_field;

/// Maximum length for a preparer-entered field value.
const MAX_VALUE_LEN: usize = 500;

#[derive(Deserialize)]
pub struct VerifyFieldRequest {
    pub field_value: String,
    pub verified_by: String,
}

/// `PUT /api/fields/:id/verify` — store the preparer's value and mark the
/// field verified at full confidence.
pub async fn verify(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(payload): Json<VerifyFieldRequest>,
) -> Result<Json<ExtractedField>, ApiError> {
    let field_id = parse_id(&id)?;

    if payload.field_value.len() > MAX_VALUE_LEN {
        return Err(ApiError::BadRequest(format!(
            "Field value too long (max {MAX_VALUE_LEN} characters)"
        )));
    }
    if payload
        .field_value
        .chars()
        .any(|c| c.is_control() && c != '\n')
    {
        return Err(ApiError::BadRequest(
            "Field value contains invalid characters".into(),
        ));
    }
    if payload.verified_by.trim().is_empty() {
        return Err(ApiError::BadRequest("verified_by is required".into()));
    }

    let conn = ctx.open_db()?;
    let updated = verify_field(
        &conn,
        &field_id,
        &payload.field_value,
        payload.verified_by.trim(),
        timestamp_now(),
    )
    .map_err(ApiError::from)?;

    Ok(Json(updated))
}
