//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use rdm_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (tokens masked)
    Show,
    /// Check that the backend settings are usable
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = super::load_config(config_path, env)?;
    config.api.access_token = mask_token(&config.api.access_token);
    config.api.refresh_token = mask_token(&config.api.refresh_token);

    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(&config),
            OutputFormat::Table => {
                println!("[api]");
                output::print_kv("base_url", &config.api.base_url);
                output::print_kv("organization_id", &config.api.organization_id);
                output::print_kv("access_token", &config.api.access_token);
                output::print_kv("refresh_token", &config.api.refresh_token);
                output::print_kv("refresh_path", &config.api.refresh_path);
                output::print_kv("timeout_seconds", &config.api.timeout_seconds.to_string());
                println!("[explorer]");
                output::print_kv("default_folder_name", &config.explorer.default_folder_name);
                output::print_kv("indent_width", &config.explorer.indent_width.to_string());
                println!("[logging]");
                output::print_kv("level", &config.logging.level);
                output::print_kv("format", &config.logging.format);
            }
        },
        ConfigCommand::Validate => match config.validate_api() {
            Ok(()) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                println!("  Backend: {}", config.api.base_url);
                println!("  Organization: {}", config.api.organization_id);
                if config.api.refresh_token.is_empty() {
                    output::print_warning("No refresh token set; expired sessions will fail");
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Keep only the last four characters of a token for display.
fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
