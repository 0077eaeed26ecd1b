use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::{parse_sql_datetime, sql_datetime, DatabaseError};
use crate::models::enums::FilingStatus;
use crate::models::{Client, ClientTaxInfo};

pub fn insert_client(conn: &Connection, client: &Client) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO clients (id, full_name, email, filing_status, tax_info, notes,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            client.id.to_string(),
            client.full_name,
            client.email,
            client.filing_status.as_ref().map(|f| f.as_str()),
            tax_info_json(client.tax_info.as_ref())?,
            client.notes,
            sql_datetime(&client.created_at),
            sql_datetime(&client.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_client(conn: &Connection, id: &Uuid) -> Result<Option<Client>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, full_name, email, filing_status, tax_info, notes, created_at, updated_at
         FROM clients WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], row_to_client);

    match result {
        Ok(row) => Ok(Some(client_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_clients(conn: &Connection) -> Result<Vec<Client>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, full_name, email, filing_status, tax_info, notes, created_at, updated_at
         FROM clients ORDER BY full_name",
    )?;

    let rows = stmt.query_map([], row_to_client)?;

    let mut clients = Vec::new();
    for row in rows {
        clients.push(client_from_row(row?)?);
    }
    Ok(clients)
}

/// Replace the client's self-reported tax information blob.
pub fn update_client_tax_info(
    conn: &Connection,
    id: &Uuid,
    tax_info: Option<&ClientTaxInfo>,
    updated_at: &chrono::NaiveDateTime,
) -> Result<(), DatabaseError> {
    let rows = conn.execute(
        "UPDATE clients SET tax_info = ?2, updated_at = ?3 WHERE id = ?1",
        params![
            id.to_string(),
            tax_info_json(tax_info)?,
            sql_datetime(updated_at),
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Client".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Fetch only the tax_info blob. Errors if the client does not exist;
/// a stored-but-unreadable blob degrades to None.
pub fn get_client_tax_info(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<ClientTaxInfo>, DatabaseError> {
    let result = conn.query_row(
        "SELECT tax_info FROM clients WHERE id = ?1",
        params![id.to_string()],
        |row| row.get::<_, Option<String>>(0),
    );

    match result {
        Ok(json) => Ok(parse_tax_info(id, json)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(DatabaseError::NotFound {
            entity_type: "Client".into(),
            id: id.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

fn tax_info_json(tax_info: Option<&ClientTaxInfo>) -> Result<Option<String>, DatabaseError> {
    tax_info
        .map(|info| {
            serde_json::to_string(info)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
        })
        .transpose()
}

fn parse_tax_info(id: &Uuid, json: Option<String>) -> Option<ClientTaxInfo> {
    let json = json?;
    match serde_json::from_str(&json) {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!(client_id = %id, error = %e, "Unreadable tax_info blob, ignoring");
            None
        }
    }
}

// Internal row type for Client mapping
struct ClientRow {
    id: String,
    full_name: String,
    email: String,
    filing_status: Option<String>,
    tax_info: Option<String>,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

fn row_to_client(row: &rusqlite::Row) -> rusqlite::Result<ClientRow> {
    Ok(ClientRow {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        filing_status: row.get(3)?,
        tax_info: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn client_from_row(row: ClientRow) -> Result<Client, DatabaseError> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    let tax_info = parse_tax_info(&id, row.tax_info);

    Ok(Client {
        id,
        full_name: row.full_name,
        email: row.email,
        filing_status: row
            .filing_status
            .as_deref()
            .and_then(|s| FilingStatus::from_str(s).ok()),
        tax_info,
        notes: row.notes,
        created_at: parse_sql_datetime(&row.created_at).unwrap_or_default(),
        updated_at: parse_sql_datetime(&row.updated_at).unwrap_or_default(),
    })
}
