//! Portal API router.
//!
//! Returns a composable `Router` with all endpoints nested under `/api/`.
//! CORS is permissive so the browser portal can call the service directly.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the portal API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/clients",
            post(endpoints::clients::create).get(endpoints::clients::list),
        )
        .route("/clients/:id", get(endpoints::clients::detail))
        .route(
            "/clients/:id/tax-info",
            get(endpoints::clients::tax_info).put(endpoints::clients::update_tax_info),
        )
        .route(
            "/clients/:id/documents",
            get(endpoints::documents::list_for_client),
        )
        .route("/clients/:id/summary", get(endpoints::summary::summary))
        .route(
            "/clients/:id/summary/export",
            get(endpoints::summary::export),
        )
        .route("/clients/:id/tasks", get(endpoints::tasks::list_for_client))
        .route("/clients/:id/messages", get(endpoints::messages::thread))
        .route("/documents", post(endpoints::documents::upload))
        .route("/documents/:id", get(endpoints::documents::detail))
        .route("/documents/:id/review", put(endpoints::documents::review))
        .route("/fields/:id/verify", put(endpoints::fields::verify))
        .route("/tasks", post(endpoints::tasks::create))
        .route("/tasks/:id/status", put(endpoints::tasks::status))
        .route("/messages", post(endpoints::messages::send))
        .route("/messages/:id/read", put(endpoints::messages::mark_read))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
