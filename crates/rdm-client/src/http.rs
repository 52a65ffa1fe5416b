//! Bearer-token REST client for the RDM backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use rdm_core::config::api::ApiConfig;
use rdm_core::error::{AppError, ErrorKind};

use crate::auth::{RefreshResponse, TokenPair};

/// Header carrying the refresh token on the refresh endpoint.
const REFRESH_HEADER: &str = "X-Refresh-Token";

/// HTTP client shared by every RDM service wrapper.
///
/// Every request carries `Authorization: Bearer <access>`. A 401 triggers
/// one token refresh followed by one retry of the same request.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    refresh_path: String,
    tokens: Arc<RwLock<TokenPair>>,
    refresh_lock: Arc<Mutex<()>>,
}

impl RestClient {
    /// Creates a client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            refresh_path: config.refresh_path.clone(),
            tokens: Arc::new(RwLock::new(TokenPair::new(
                config.access_token.clone(),
                config.refresh_token.clone(),
            ))),
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Current token pair.
    pub async fn tokens(&self) -> TokenPair {
        self.tokens.read().await.clone()
    }

    /// Replace the token pair (e.g. after an interactive login).
    pub async fn set_tokens(&self, tokens: TokenPair) {
        *self.tokens.write().await = tokens;
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.get_json_query(path, &[]).await
    }

    /// GET with URL-encoded query parameters.
    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        decode(response).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::POST, path, &[], Some(&body)).await?;
        decode(response).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::PUT, path, &[], Some(&body)).await?;
        decode(response).await
    }

    /// POST whose response body is ignored.
    pub async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, &[], Some(&body)).await?;
        Ok(())
    }

    /// DELETE whose response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Sends a request, refreshing the token and retrying once on 401.
    /// Returns only successful responses.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<Response, AppError> {
        let stale = self.tokens().await;
        let response = self.send_once(method.clone(), path, query, body, &stale).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return check_status(response).await;
        }

        if !stale.can_refresh() {
            return Err(AppError::authentication(
                "Access token rejected and no refresh token is configured",
            ));
        }

        warn!(%method, path, "Access token rejected, refreshing");
        self.refresh(&stale).await?;

        let fresh = self.tokens().await;
        let response = self.send_once(method, path, query, body, &fresh).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::authentication(
                "Request still unauthorized after token refresh",
            ));
        }
        check_status(response).await
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
        tokens: &TokenPair,
    ) -> Result<Response, AppError> {
        debug!(%method, path, "RDM request");
        let url = if query.is_empty() {
            Url::parse(&self.url(path))
        } else {
            Url::parse_with_params(&self.url(path), query)
        }
        .map_err(|e| AppError::configuration(format!("Invalid request URL: {e}")))?;
        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&tokens.access_token);
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(transport_error)
    }

    /// Exchanges the refresh token for a new pair.
    ///
    /// Concurrent callers that saw the same stale pair refresh only once.
    async fn refresh(&self, stale: &TokenPair) -> Result<(), AppError> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.tokens().await;
        if current.access_token != stale.access_token {
            debug!("Token already refreshed by another request");
            return Ok(());
        }

        let response = self
            .client
            .post(self.url(&self.refresh_path))
            .header(REFRESH_HEADER, &current.refresh_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body: RefreshResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(transport_error(e)),
            Err(_) => {
                return Err(AppError::authentication(format!(
                    "Token refresh failed with status {}",
                    status.as_u16()
                )));
            }
        };

        let tokens = body.into_tokens(&current)?;
        *self.tokens.write().await = tokens;
        info!("Access token refreshed");
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::from_status(status.as_u16(), body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Maps transport-level failures into application errors.
pub fn transport_error(err: reqwest::Error) -> AppError {
    let kind = if err.is_timeout() || err.is_connect() {
        ErrorKind::ServiceUnavailable
    } else if err.is_decode() {
        ErrorKind::Serialization
    } else {
        ErrorKind::ExternalService
    };
    AppError::with_source(kind, format!("RDM request failed: {err}"), err)
}
