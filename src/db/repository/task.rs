use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::{parse_sql_datetime, sql_datetime, DatabaseError};
use crate::models::enums::{TaskPriority, TaskStatus};
use crate::models::Task;

const TASK_COLUMNS: &str =
    "id, client_id, title, description, priority, status, due_date, created_at, completed_at";

pub fn insert_task(conn: &Connection, task: &Task) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO tasks (id, client_id, title, description, priority, status, due_date,
         created_at, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            task.id.to_string(),
            task.client_id.to_string(),
            task.title,
            task.description,
            task.priority.as_str(),
            task.status.as_str(),
            task.due_date.map(|d| d.to_string()),
            sql_datetime(&task.created_at),
            task.completed_at.as_ref().map(sql_datetime),
        ],
    )?;
    Ok(())
}

pub fn get_task(conn: &Connection, id: &Uuid) -> Result<Option<Task>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))?;

    let result = stmt.query_row(params![id.to_string()], row_to_task);

    match result {
        Ok(row) => Ok(Some(task_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_tasks_for_client(
    conn: &Connection,
    client_id: &Uuid,
) -> Result<Vec<Task>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE client_id = ?1 ORDER BY created_at DESC, rowid DESC"
    ))?;

    let rows = stmt.query_map(params![client_id.to_string()], row_to_task)?;

    let mut tasks = Vec::new();
    for row in rows {
        tasks.push(task_from_row(row?)?);
    }
    Ok(tasks)
}

/// Move a task through its workflow. Completion stamps completed_at;
/// any other status clears it.
pub fn update_task_status(
    conn: &Connection,
    id: &Uuid,
    status: &TaskStatus,
    now: &NaiveDateTime,
) -> Result<Task, DatabaseError> {
    let completed_at = match status {
        TaskStatus::Completed => Some(sql_datetime(now)),
        _ => None,
    };
    let rows = conn.execute(
        "UPDATE tasks SET status = ?2, completed_at = ?3 WHERE id = ?1",
        params![id.to_string(), status.as_str(), completed_at],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Task".into(),
            id: id.to_string(),
        });
    }

    get_task(conn, id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "Task".into(),
        id: id.to_string(),
    })
}

// Internal row type for Task mapping
struct TaskRow {
    id: String,
    client_id: String,
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    due_date: Option<String>,
    created_at: String,
    completed_at: Option<String>,
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        priority: row.get(4)?,
        status: row.get(5)?,
        due_date: row.get(6)?,
        created_at: row.get(7)?,
        completed_at: row.get(8)?,
    })
}

fn task_from_row(row: TaskRow) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        client_id: Uuid::parse_str(&row.client_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        title: row.title,
        description: row.description,
        priority: TaskPriority::from_str(&row.priority)?,
        status: TaskStatus::from_str(&row.status)?,
        due_date: row
            .due_date
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        created_at: parse_sql_datetime(&row.created_at).unwrap_or_default(),
        completed_at: row.completed_at.as_deref().and_then(parse_sql_datetime),
    })
}
