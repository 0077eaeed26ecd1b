//! Client roster and self-reported tax info endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{
    get_client, get_client_tax_info, insert_client, list_clients, update_client_tax_info,
};
use crate::db::timestamp_now;
use crate::models::enums::FilingStatus;
use crate::models::{Client, ClientTaxInfo};

#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub full_name: String,
    pub email: String,
    pub filing_status: Option<FilingStatus>,
    pub notes: Option<String>,
}

/// `POST /api/clients` — register a client on the roster.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    if payload.full_name.trim().is_empty() {
        return Err(ApiError::BadRequest("full_name is required".into()));
    }
    if payload.email.trim().is_empty() {
        return Err(ApiError::BadRequest("email is required".into()));
    }

    let now = timestamp_now();
    let client = Client {
        id: Uuid::new_v4(),
        full_name: payload.full_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        filing_status: payload.filing_status,
        tax_info: None,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };

    let conn = ctx.open_db()?;
    insert_client(&conn, &client).map_err(ApiError::from)?;

    tracing::info!(client_id = %client.id, "Client registered");

    Ok(Json(client))
}

/// `GET /api/clients` — full roster, alphabetical.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Client>>, ApiError> {
    let conn = ctx.open_db()?;
    let clients = list_clients(&conn).map_err(ApiError::from)?;
    Ok(Json(clients))
}

/// `GET /api/clients/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    let client = get_client(&conn, &id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {id}")))?;
    Ok(Json(client))
}

/// `GET /api/clients/:id/tax-info` — the self-reported blob, null when the
/// client has not filled anything in yet.
pub async fn tax_info(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Option<ClientTaxInfo>>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    let info = get_client_tax_info(&conn, &id).map_err(ApiError::from)?;
    Ok(Json(info))
}

/// `PUT /api/clients/:id/tax-info` — replace the self-reported blob.
pub async fn update_tax_info(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(payload): Json<ClientTaxInfo>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    update_client_tax_info(&conn, &id, Some(&payload), &timestamp_now())
        .map_err(ApiError::from)?;

    tracing::info!(
        client_id = %id,
        income_sources = payload.income_sources.len(),
        deductions = payload.deductions.len(),
        dependents = payload.dependents.len(),
        "Tax info updated"
    );

    Ok(StatusCode::NO_CONTENT)
}
