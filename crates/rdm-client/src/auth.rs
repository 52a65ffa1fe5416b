//! Access/refresh token handling.

use serde::{Deserialize, Serialize};

use rdm_core::error::AppError;

/// The bearer token pair held by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    /// Sent as `Authorization: Bearer <access_token>`.
    pub access_token: String,
    /// Sent as `X-Refresh-Token` to obtain a new pair.
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Whether a refresh can be attempted.
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.trim().is_empty()
    }
}

/// Response of the refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl RefreshResponse {
    /// Turn a refresh response into the next token pair.
    ///
    /// A response without a new refresh token keeps the current one.
    pub fn into_tokens(self, current: &TokenPair) -> Result<TokenPair, AppError> {
        if !self.success {
            let message = if self.message.is_empty() {
                "Token refresh was rejected".to_string()
            } else {
                self.message
            };
            return Err(AppError::authentication(message));
        }

        let access_token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Refresh response carried no token"))?;

        Ok(TokenPair {
            access_token,
            refresh_token: self
                .refresh_token
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| current.refresh_token.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdm_core::error::ErrorKind;

    #[test]
    fn test_successful_refresh() {
        let response: RefreshResponse = serde_json::from_str(
            r#"{"success":true,"message":"ok","token":"new-access","refreshToken":"new-refresh"}"#,
        )
        .expect("decode");
        let tokens = response
            .into_tokens(&TokenPair::new("old", "old-refresh"))
            .expect("tokens");
        assert_eq!(tokens, TokenPair::new("new-access", "new-refresh"));
    }

    #[test]
    fn test_refresh_keeps_refresh_token_when_absent() {
        let response: RefreshResponse =
            serde_json::from_str(r#"{"success":true,"token":"new-access"}"#).expect("decode");
        let tokens = response
            .into_tokens(&TokenPair::new("old", "keep-me"))
            .expect("tokens");
        assert_eq!(tokens.refresh_token, "keep-me");
    }

    #[test]
    fn test_rejected_refresh() {
        let response: RefreshResponse =
            serde_json::from_str(r#"{"success":false,"message":"Invalid refresh token"}"#)
                .expect("decode");
        let err = response
            .into_tokens(&TokenPair::default())
            .expect_err("rejected");
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Invalid refresh token");
    }

    #[test]
    fn test_can_refresh() {
        assert!(!TokenPair::new("a", " ").can_refresh());
        assert!(TokenPair::new("a", "r").can_refresh());
    }
}
