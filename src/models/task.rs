use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{TaskPriority, TaskStatus};

/// A preparer-assigned to-do for a client (e.g. "upload your W-2").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}
