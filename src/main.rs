//! RDM Console — interactive folder explorer
//!
//! Wires configuration, logging, the folder backend, and the sync worker
//! together and runs the line-oriented explorer on stdin.

mod console;

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use rdm_client::{FolderApi, FolderSync, HttpFolderApi, MemoryFolderStore, RestClient};
use rdm_core::config::AppConfig;
use rdm_core::error::AppError;
use rdm_core::types::OrganizationId;
use rdm_explorer::FolderExplorer;

use crate::console::Console;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Console error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("RDM_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("RDM_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging. Logs go to stderr so they do not interleave
/// with the rendered tree on stdout.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// `--offline` or `RDM_OFFLINE=1` selects the seeded in-memory store.
fn offline_requested() -> bool {
    std::env::args().skip(1).any(|arg| arg == "--offline")
        || std::env::var("RDM_OFFLINE").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn build_api(config: &AppConfig) -> Result<Arc<dyn FolderApi>, AppError> {
    if offline_requested() {
        tracing::info!("Running offline against the seeded in-memory store");
        return Ok(Arc::new(MemoryFolderStore::seeded()));
    }

    config.validate_api()?;
    tracing::info!("Connecting to RDM backend at {}", config.api.base_url);
    let rest = RestClient::new(&config.api)?;
    let organization_id = OrganizationId::new(config.api.organization_id.clone());
    Ok(Arc::new(HttpFolderApi::new(rest, organization_id)))
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RDM console v{}", env!("CARGO_PKG_VERSION"));

    let api = build_api(&config)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (host, handle) = FolderSync::spawn(api, shutdown_rx);

    let explorer = FolderExplorer::new(host)
        .with_default_folder_name(config.explorer.default_folder_name.clone());
    let view = Console::new(explorer, config.explorer.indent_width);

    let result = console::run(view, handle, shutdown_signal()).await;

    let _ = shutdown_tx.send(true);
    tracing::info!("RDM console shut down");
    result
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
