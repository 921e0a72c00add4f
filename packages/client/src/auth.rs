//! OAuth token lifecycle
//!
//! Tokens live in a JSON file next to the project. An access token is used
//! while it has more than five minutes left; after that the refresh token is
//! exchanged for a new pair, which is written back to the same file.

use crate::error::{ClientError, ClientResult};
use crate::transport::HttpTransport;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TOKEN_ENDPOINT: &str = "https://api.figma.com/v1/oauth/token";

/// Remaining lifetime below which an access token is refreshed
pub const EXPIRY_BUFFER_MS: i64 = 5 * 60 * 1000;

const INVALID_GRANT: &str = "invalid_grant";

/// Client id and secret of the registered OAuth app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> ClientResult<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(ClientError::MissingCredentials);
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Build from optional values, typically read from the environment
    pub fn from_parts(
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> ClientResult<Self> {
        match (client_id, client_secret) {
            (Some(id), Some(secret)) => Self::new(id, secret),
            _ => Err(ClientError::MissingCredentials),
        }
    }
}

/// Token pair as persisted on disk. `expires_at` is in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl StoredTokens {
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        !self.access_token.is_empty()
            && self.expires_at != 0
            && now_ms < self.expires_at - EXPIRY_BUFFER_MS
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp_millis())
    }
}

/// Body of the token endpoint, success or failure
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    token_type: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl TokenResponse {
    /// Convert to stored tokens, keeping `previous_refresh` when the server
    /// did not rotate the refresh token
    fn into_tokens(self, previous_refresh: &str, now_ms: i64) -> ClientResult<StoredTokens> {
        if let Some(error) = self.error {
            if error.contains(INVALID_GRANT) {
                return Err(ClientError::RefreshTokenExpired);
            }
            return Err(ClientError::OAuth(self.error_description.unwrap_or(error)));
        }

        let access_token = self
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::OAuth("token response has no access_token".to_string()))?;
        let expires_in = self.expires_in.unwrap_or_default();

        Ok(StoredTokens {
            access_token,
            refresh_token: self
                .refresh_token
                .filter(|token| !token.is_empty())
                .unwrap_or_else(|| previous_refresh.to_string()),
            expires_in,
            expires_at: now_ms + expires_in * 1000,
            token_type: self.token_type.unwrap_or_else(default_token_type),
        })
    }
}

/// JSON token file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored tokens, or `None` when the file is missing or unreadable
    pub async fn load(&self) -> Option<StoredTokens> {
        let content = tokio::fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "Ignoring unreadable token file");
                None
            }
        }
    }

    pub async fn save(&self, tokens: &StoredTokens) -> ClientResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_string_pretty(tokens)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Source of bearer tokens for API requests
pub trait AuthProvider: Send + Sync {
    /// A token that is not about to expire, refreshing first if needed
    fn valid_token(&self) -> impl Future<Output = ClientResult<String>> + Send;

    /// Unconditionally exchange the refresh token, for use after a 401
    fn refresh(&self) -> impl Future<Output = ClientResult<String>> + Send;
}

/// Explicit authentication state: credentials, token file and the transport
/// used to reach the token endpoint
#[derive(Debug, Clone)]
pub struct AuthContext<T> {
    credentials: OAuthCredentials,
    store: TokenStore,
    transport: T,
    token_url: String,
}

impl<T: HttpTransport> AuthContext<T> {
    pub fn new(credentials: OAuthCredentials, store: TokenStore, transport: T) -> Self {
        Self {
            credentials,
            store,
            transport,
            token_url: TOKEN_ENDPOINT.to_string(),
        }
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn stored_tokens(&self) -> ClientResult<StoredTokens> {
        self.store
            .load()
            .await
            .filter(|tokens| !tokens.refresh_token.is_empty())
            .ok_or_else(|| ClientError::TokensNotFound {
                path: self.store.path().to_path_buf(),
            })
    }

    async fn refresh_with(&self, refresh_token: &str) -> ClientResult<String> {
        info!("Refreshing access token");
        let form = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        let response = self.transport.post_form(&self.token_url, &form).await?;

        if !response.is_success() {
            if response.body.contains(INVALID_GRANT) {
                return Err(ClientError::RefreshTokenExpired);
            }
            return Err(ClientError::OAuth(format!(
                "token refresh failed: {} {}",
                response.status, response.body
            )));
        }

        let body: TokenResponse = serde_json::from_str(&response.body)?;
        let tokens = body.into_tokens(refresh_token, Utc::now().timestamp_millis())?;
        self.store.save(&tokens).await?;
        info!(expires_in = tokens.expires_in, "Access token refreshed");
        Ok(tokens.access_token)
    }
}

impl<T: HttpTransport> AuthProvider for AuthContext<T> {
    async fn valid_token(&self) -> ClientResult<String> {
        let tokens = self.stored_tokens().await?;
        if tokens.is_valid() {
            debug!("Using stored access token");
            return Ok(tokens.access_token);
        }
        self.refresh_with(&tokens.refresh_token).await
    }

    async fn refresh(&self) -> ClientResult<String> {
        let tokens = self.stored_tokens().await?;
        self.refresh_with(&tokens.refresh_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(expires_at: i64) -> StoredTokens {
        StoredTokens {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_in: 3600,
            expires_at,
            token_type: "Bearer".to_string(),
        }
    }

    #[test]
    fn test_expiry_buffer() {
        let now = 1_000_000_000;
        assert!(tokens(now + EXPIRY_BUFFER_MS + 1).is_valid_at(now));
        assert!(!tokens(now + EXPIRY_BUFFER_MS).is_valid_at(now));
        assert!(!tokens(0).is_valid_at(now));

        let mut empty = tokens(now * 2);
        empty.access_token.clear();
        assert!(!empty.is_valid_at(now));
    }

    #[test]
    fn test_missing_credentials() {
        assert!(matches!(
            OAuthCredentials::new("", "secret"),
            Err(ClientError::MissingCredentials)
        ));
        assert!(matches!(
            OAuthCredentials::from_parts(Some("id".to_string()), None),
            Err(ClientError::MissingCredentials)
        ));
        assert!(OAuthCredentials::new("id", "secret").is_ok());
    }

    #[test]
    fn test_refresh_token_kept_when_not_rotated() {
        let response: TokenResponse =
            serde_json::from_str(r#"{ "access_token": "new", "expires_in": 60 }"#).unwrap();
        let tokens = response.into_tokens("old-refresh", 1_000).unwrap();
        assert_eq!(tokens.access_token, "new");
        assert_eq!(tokens.refresh_token, "old-refresh");
        assert_eq!(tokens.expires_at, 61_000);
        assert_eq!(tokens.token_type, "Bearer");
    }

    #[test]
    fn test_error_bodies() {
        let expired: TokenResponse =
            serde_json::from_str(r#"{ "error": "invalid_grant" }"#).unwrap();
        assert!(matches!(
            expired.into_tokens("r", 0),
            Err(ClientError::RefreshTokenExpired)
        ));

        let other: TokenResponse = serde_json::from_str(
            r#"{ "error": "invalid_client", "error_description": "Unknown client" }"#,
        )
        .unwrap();
        match other.into_tokens("r", 0) {
            Err(ClientError::OAuth(message)) => assert_eq!(message, "Unknown client"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join(".figma-tokens.json"));
        assert!(store.load().await.is_none());

        store.save(&tokens(42)).await.unwrap();
        assert_eq!(store.load().await, Some(tokens(42)));
    }

    #[tokio::test]
    async fn test_unreadable_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(TokenStore::new(path).load().await.is_none());
    }
}
