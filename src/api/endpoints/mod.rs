pub mod clients;
pub mod documents;
pub mod fields;
pub mod health;
pub mod messages;
pub mod summary;
pub mod tasks;

use uuid::Uuid;

use crate::api::error::ApiError;

/// Parse a path-segment id, surfacing a 400 rather than a routing miss.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| ApiError::BadRequest(format!("Invalid id: {e}")))
}
