use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use taxfolio::api::router::api_router;
use taxfolio::api::types::ApiContext;
use taxfolio::{config, db};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let data_dir = config::data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(dir = %data_dir.display(), error = %e, "Cannot create data directory");
        return ExitCode::FAILURE;
    }

    let db_path = config::database_path();
    match db::sqlite::open_database(&db_path) {
        Ok(_) => tracing::info!(db = %db_path.display(), "Database ready"),
        Err(e) => {
            tracing::error!(db = %db_path.display(), error = %e, "Cannot open database");
            return ExitCode::FAILURE;
        }
    }

    let app = api_router(ApiContext::new(db_path));
    let addr = SocketAddr::from(([127, 0, 0, 1], config::server_port()));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Cannot bind API port");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "Portal API listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
