use figport_document::DocumentError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from authentication and the file API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("OAuth credentials required: FIGMA_CLIENT_ID and FIGMA_CLIENT_SECRET must be set")]
    MissingCredentials,

    #[error("OAuth tokens not found in {}; authorize the app first", path.display())]
    TokensNotFound { path: PathBuf },

    #[error("Refresh token expired; re-authorize the app")]
    RefreshTokenExpired,

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid design file: {0}")]
    Document(#[from] DocumentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The stored authorization is unusable and the app must be authorized again
    pub fn needs_reauthorization(&self) -> bool {
        matches!(
            self,
            ClientError::TokensNotFound { .. } | ClientError::RefreshTokenExpired
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
