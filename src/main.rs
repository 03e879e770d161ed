use axum::extract::State;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod api;
mod app_env;
mod domain;
mod dto;
mod external_connections;
mod logging;
mod persistence;
mod routes;
mod routing_utils;
mod view;

/// Data shared with every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

/// Extractor handlers use to reach [SharedData]
pub type AppState = State<Arc<SharedData>>;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    if dotenv().is_err() {
        println!("Starting without a .env file.");
    }

    let config = app_env::AppConfig::from_env()?;
    let otel_exporters = config
        .otel
        .as_ref()
        .map(logging::init_exporters)
        .transpose()?;
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);

    let pool = persistence::connect_sqlx(&config.db_url, config.db_max_connections).await?;
    persistence::run_migrations(&pool).await?;

    let router = routes::build_router(persistence::ExternalConnectivity::new(pool));
    let listener = TcpListener::bind(config.server_addr).await?;

    info!("Starting server on {}.", config.server_addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Could not listen for the shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
