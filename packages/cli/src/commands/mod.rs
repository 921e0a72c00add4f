pub mod export_components;
pub mod export_fonts;
pub mod export_images;
pub mod oauth_check;

pub use export_components::{export_components, ExportComponentsArgs};
pub use export_fonts::{export_fonts, ExportFontsArgs};
pub use export_images::{export_images, ExportImagesArgs};
pub use oauth_check::{oauth_check, OauthCheckArgs};

use crate::config::Config;
use anyhow::{anyhow, Result};
use colored::Colorize;
use figport_client::{
    AuthContext, AuthProvider, FigmaClient, OAuthCredentials, ReqwestTransport, TokenStore,
};
use figport_document::FileResponse;
use std::path::{Path, PathBuf};
use tracing::debug;

/// API client over the network, authenticated from the environment and token file
pub type RemoteClient = FigmaClient<AuthContext<ReqwestTransport>, ReqwestTransport>;

/// Build the API client and make sure a usable access token exists
pub async fn connect(env: &Environment, config: &Config, cwd: &Path) -> Result<RemoteClient> {
    let credentials =
        OAuthCredentials::from_parts(env.client_id.clone(), env.client_secret.clone())?;
    let transport = ReqwestTransport::new();
    let auth = AuthContext::new(
        credentials,
        TokenStore::new(config.token_path(cwd)),
        transport.clone(),
    );

    println!("{}", "Checking OAuth authorization...".bright_blue());
    auth.valid_token().await?;
    println!("  {} OAuth authorization OK", "✓".green());

    Ok(FigmaClient::new(auth, transport))
}

pub const FILE_KEY_VAR: &str = "FILE_KEY";
pub const CLIENT_ID_VAR: &str = "FIGMA_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "FIGMA_CLIENT_SECRET";

/// Process environment, read once at startup
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub file_key: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Environment {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|value| !value.trim().is_empty());
        Self {
            file_key: var(FILE_KEY_VAR),
            client_id: var(CLIENT_ID_VAR),
            client_secret: var(CLIENT_SECRET_VAR),
        }
    }
}

/// Where the design file comes from: the API or a saved response
#[derive(Debug, Clone)]
pub enum Source {
    Remote { file_key: String },
    Saved { path: PathBuf, file_key: String },
}

impl Source {
    /// A saved response needs no file key; the file stem stands in for it
    pub fn resolve(input: Option<PathBuf>, file_key: Option<String>) -> Result<Self> {
        match (input, file_key) {
            (Some(path), file_key) => {
                let file_key = file_key.unwrap_or_else(|| {
                    path.file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_default()
                });
                Ok(Source::Saved { path, file_key })
            }
            (None, Some(file_key)) => Ok(Source::Remote { file_key }),
            (None, None) => Err(anyhow!(
                "{} is not set; pass --file-key or set it in the environment",
                FILE_KEY_VAR
            )),
        }
    }

    pub fn file_key(&self) -> &str {
        match self {
            Source::Remote { file_key } | Source::Saved { file_key, .. } => file_key,
        }
    }

    pub async fn load(
        &self,
        env: &Environment,
        config: &Config,
        cwd: &Path,
    ) -> Result<FileResponse> {
        match self {
            Source::Saved { path, .. } => {
                debug!(path = %path.display(), "Loading saved file response");
                println!("{} {}", "Reading".bright_blue(), path.display());
                Ok(figport_document::read_file(path)?)
            }
            Source::Remote { file_key } => {
                let client = connect(env, config, cwd).await?;
                println!("{}", "Fetching design file...".bright_blue());
                Ok(client.get_file(file_key).await?)
            }
        }
    }
}
