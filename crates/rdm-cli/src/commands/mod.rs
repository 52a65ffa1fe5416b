//! CLI command definitions and dispatch.

pub mod config;
pub mod folder;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use rdm_client::{FolderApi, HttpFolderApi, MemoryFolderStore, RestClient};
use rdm_core::config::AppConfig;
use rdm_core::error::AppError;
use rdm_core::types::OrganizationId;

use crate::output::OutputFormat;

/// RDM — document management folder administration
#[derive(Debug, Parser)]
#[command(name = "rdm", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from config/<env>
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Run against a seeded in-memory folder store instead of the backend
    #[arg(long)]
    pub offline: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Folder(folder::FolderCommand),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Folder(command) => {
                let config = load_config(&self.config, &self.env)?;
                let api = build_api(&config, self.offline)?;
                folder::execute(command, &config, api.as_ref(), self.format).await
            }
            Commands::Config(args) => config::execute(args, &self.config, &self.env, self.format),
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}

/// Helper: the folder backend selected by `--offline`
pub fn build_api(config: &AppConfig, offline: bool) -> Result<Arc<dyn FolderApi>, AppError> {
    if offline {
        tracing::debug!("Using seeded in-memory folder store");
        return Ok(Arc::new(MemoryFolderStore::seeded()));
    }

    config.validate_api()?;
    let rest = RestClient::new(&config.api)?;
    let organization_id = OrganizationId::new(config.api.organization_id.clone());
    Ok(Arc::new(HttpFolderApi::new(rest, organization_id)))
}
