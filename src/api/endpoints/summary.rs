//! Tax summary endpoints for the tax-prep workspace.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::Json;
use serde::Deserialize;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config::current_tax_year;
use crate::db::repository::get_client;
use crate::summary::{render_summary_report, summary_for_client, TaxSummary};

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub tax_year: Option<i32>,
}

/// `GET /api/clients/:id/summary?tax_year=` — the categorized rollup,
/// recomputed on every call.
pub async fn summary(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<TaxSummary>, ApiError> {
    let client_id = parse_id(&id)?;
    let tax_year = query.tax_year.unwrap_or_else(current_tax_year);

    let conn = ctx.open_db()?;
    let summary = summary_for_client(&conn, &client_id, tax_year).map_err(ApiError::from)?;
    Ok(Json(summary))
}

/// `GET /api/clients/:id/summary/export?tax_year=` — the flat plain-text
/// report handed to the preparer.
pub async fn export(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<([(header::HeaderName, &'static str); 1], String), ApiError> {
    let client_id = parse_id(&id)?;
    let tax_year = query.tax_year.unwrap_or_else(current_tax_year);

    let conn = ctx.open_db()?;
    let client = get_client(&conn, &client_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {client_id}")))?;
    let summary = summary_for_client(&conn, &client_id, tax_year).map_err(ApiError::from)?;

    let report = render_summary_report(
        &client.full_name,
        &client.email,
        tax_year,
        chrono::Utc::now().date_naive(),
        &summary,
    );

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    ))
}
