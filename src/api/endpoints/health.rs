//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::sqlite::count_tables;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /api/health` — connection and schema check.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let conn = ctx.open_db()?;
    count_tables(&conn).map_err(ApiError::from)?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
    }))
}
