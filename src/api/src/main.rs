//! Race Report API
//!
//! Web report and CLI over a SQLite table of race results.

mod cli;
mod config;
mod error;
mod format;
mod html;
mod report;
mod routes;
mod storage;
mod types;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            database,
        } => run_server(host, port, database).await,
        Commands::Report {
            format,
            order,
            database,
        } => cli::run_report(format, order, database),
        Commands::Drivers {
            driver_id,
            database,
        } => cli::run_drivers(driver_id, database),
    }
}

/// Run the API server.
async fn run_server(
    host: Option<String>,
    port: Option<u16>,
    database: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "race_report_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, CLI args take precedence
    let mut config = cli::load_config(database)?;
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Database path: {}", config.storage.database_path);

    let state = Arc::new(AppState::new(config.clone()));
    if !state.store.path().exists() {
        tracing::warn!(
            "Database {} not found; report pages will show data_unevalable",
            state.store.path().display()
        );
    }

    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
