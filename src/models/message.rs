use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::MessageSender;

/// One entry in the per-client message thread between preparer and client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub client_id: Uuid,
    pub sender: MessageSender,
    pub subject: Option<String>,
    pub body: String,
    pub read: bool,
    pub related_document_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}
