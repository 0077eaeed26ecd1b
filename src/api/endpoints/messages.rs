//! Message-thread endpoints between preparer and client.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{
    get_client, get_messages_for_client, insert_message, mark_message_read,
};
use crate::db::timestamp_now;
use crate::models::enums::MessageSender;
use crate::models::Message;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub client_id: Uuid,
    pub sender: MessageSender,
    pub subject: Option<String>,
    pub body: String,
    pub related_document_id: Option<Uuid>,
}

/// `POST /api/messages`
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<Message>, ApiError> {
    if payload.body.trim().is_empty() {
        return Err(ApiError::BadRequest("body is required".into()));
    }

    let conn = ctx.open_db()?;
    get_client(&conn, &payload.client_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {}", payload.client_id)))?;

    let message = Message {
        id: Uuid::new_v4(),
        client_id: payload.client_id,
        sender: payload.sender,
        subject: payload.subject,
        body: payload.body,
        read: false,
        related_document_id: payload.related_document_id,
        created_at: timestamp_now(),
    };
    insert_message(&conn, &message).map_err(ApiError::from)?;

    Ok(Json(message))
}

/// `GET /api/clients/:id/messages` — the thread, oldest first.
pub async fn thread(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let client_id = parse_id(&id)?;
    let conn = ctx.open_db()?;

    get_client(&conn, &client_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {client_id}")))?;

    let messages = get_messages_for_client(&conn, &client_id).map_err(ApiError::from)?;
    Ok(Json(messages))
}

/// `PUT /api/messages/:id/read`
pub async fn mark_read(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let message_id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    mark_message_read(&conn, &message_id).map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
