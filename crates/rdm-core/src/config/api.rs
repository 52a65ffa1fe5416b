//! RDM backend connection configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the RDM REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the RDM backend (no trailing slash required).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Organization whose folders are managed.
    #[serde(default)]
    pub organization_id: String,
    /// Bearer access token.
    #[serde(default)]
    pub access_token: String,
    /// Refresh token sent as `X-Refresh-Token` when the access token expires.
    #[serde(default)]
    pub refresh_token: String,
    /// Path of the token refresh endpoint.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            organization_id: String::new(),
            access_token: String::new(),
            refresh_token: String::new(),
            refresh_path: default_refresh_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_refresh_path() -> String {
    "/rdm/refresh".to_string()
}

fn default_timeout() -> u64 {
    30
}
