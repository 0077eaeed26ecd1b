use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::{parse_sql_datetime, sql_datetime, DatabaseError};
use crate::models::enums::MessageSender;
use crate::models::Message;

const MESSAGE_COLUMNS: &str =
    "id, client_id, sender, subject, body, read, related_document_id, created_at";

pub fn insert_message(conn: &Connection, message: &Message) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO messages (id, client_id, sender, subject, body, read,
         related_document_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            message.id.to_string(),
            message.client_id.to_string(),
            message.sender.as_str(),
            message.subject,
            message.body,
            message.read as i32,
            message.related_document_id.map(|id| id.to_string()),
            sql_datetime(&message.created_at),
        ],
    )?;
    Ok(())
}

/// The client's message thread, oldest first.
pub fn get_messages_for_client(
    conn: &Connection,
    client_id: &Uuid,
) -> Result<Vec<Message>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE client_id = ?1 ORDER BY created_at, rowid"
    ))?;

    let rows = stmt.query_map(params![client_id.to_string()], row_to_message)?;

    let mut messages = Vec::new();
    for row in rows {
        messages.push(message_from_row(row?)?);
    }
    Ok(messages)
}

pub fn mark_message_read(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let rows = conn.execute(
        "UPDATE messages SET read = 1 WHERE id = ?1",
        params![id.to_string()],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Message".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// Internal row type for Message mapping
struct MessageRow {
    id: String,
    client_id: String,
    sender: String,
    subject: Option<String>,
    body: String,
    read: i32,
    related_document_id: Option<String>,
    created_at: String,
}

fn row_to_message(row: &rusqlite::Row) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        sender: row.get(2)?,
        subject: row.get(3)?,
        body: row.get(4)?,
        read: row.get(5)?,
        related_document_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn message_from_row(row: MessageRow) -> Result<Message, DatabaseError> {
    Ok(Message {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        client_id: Uuid::parse_str(&row.client_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        sender: MessageSender::from_str(&row.sender)?,
        subject: row.subject,
        body: row.body,
        read: row.read != 0,
        related_document_id: row
            .related_document_id
            .and_then(|s| Uuid::parse_str(&s).ok()),
        created_at: parse_sql_datetime(&row.created_at).unwrap_or_default(),
    })
}
