//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file, an optional environment overlay, and `RDM__*`
//! environment variables. Every field has a default, so an empty
//! configuration is valid.

pub mod api;
pub mod explorer;
pub mod logging;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::api::ApiConfig;
use self::explorer::ExplorerConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// RDM backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Folder explorer settings.
    #[serde(default)]
    pub explorer: ExplorerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config_path`, the `config/{env}` overlay, and environment
    /// variables prefixed with `RDM` (e.g. `RDM__API__BASE_URL`). Missing
    /// files are skipped.
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        debug!(config_path, env, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("RDM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from TOML text, without file or environment lookup.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Check the settings required to talk to the backend.
    pub fn validate_api(&self) -> Result<(), AppError> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        if self.api.organization_id.trim().is_empty() {
            return Err(AppError::configuration(
                "api.organization_id must be set (RDM__API__ORGANIZATION_ID)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config");
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.refresh_path, "/rdm/refresh");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.explorer.default_folder_name, "New Folder");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://rdm.example.com"
            organization_id = "org-1"

            [explorer]
            default_folder_name = "Untitled"
            "#,
        )
        .expect("partial config");
        assert_eq!(config.api.base_url, "https://rdm.example.com");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.explorer.default_folder_name, "Untitled");
        assert_eq!(config.explorer.indent_width, 2);
        assert!(config.validate_api().is_ok());
    }

    #[test]
    fn test_validate_requires_organization() {
        let config = AppConfig::default();
        let err = config.validate_api().expect_err("missing org");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
