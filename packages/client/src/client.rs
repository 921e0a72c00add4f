use crate::auth::AuthProvider;
use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpResponse, HttpTransport};
use figport_document::FileResponse;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

pub const API_BASE: &str = "https://api.figma.com/v1";

/// Where an authenticated request stands. A request starts `Authorized`; a
/// 401 moves it to `NeedsRefresh` once, after which the next response is final.
enum RequestState {
    Authorized { token: String, refreshed: bool },
    NeedsRefresh,
}

/// Body of the image render endpoint. `images` maps node ids to download
/// URLs; a node that failed to render maps to `null`.
#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    images: HashMap<String, Option<String>>,
}

/// Read-only client of the design tool's file API
#[derive(Debug, Clone)]
pub struct FigmaClient<A, T> {
    auth: A,
    transport: T,
    base_url: String,
}

impl<A: AuthProvider, T: HttpTransport> FigmaClient<A, T> {
    pub fn new(auth: A, transport: T) -> Self {
        Self {
            auth,
            transport,
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Fetch the whole document tree of a file
    #[instrument(skip(self))]
    pub async fn get_file(&self, file_key: &str) -> ClientResult<FileResponse> {
        let url = format!("{}/files/{}", self.base_url, file_key);
        let response = self.get_authorized(&url).await?;

        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let file = figport_document::parse_file(&response.body)?;
        info!(name = %file.name, "Fetched design file");
        Ok(file)
    }

    /// Render nodes to images in `format` (`png`, `webp`, ...) and return the
    /// download URL of each node that rendered
    #[instrument(skip(self))]
    pub async fn get_images(
        &self,
        file_key: &str,
        node_ids: &[&str],
        format: &str,
    ) -> ClientResult<HashMap<String, String>> {
        let url = format!(
            "{}/images/{}?ids={}&format={}",
            self.base_url,
            file_key,
            node_ids.join(","),
            format
        );
        let response = self.get_authorized(&url).await?;

        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: ImagesResponse = serde_json::from_str(&response.body)?;
        if let Some(err) = parsed.err {
            return Err(ClientError::Api(err));
        }

        Ok(parsed
            .images
            .into_iter()
            .filter_map(|(id, url)| url.map(|url| (id, url)))
            .collect())
    }

    /// Download a rendered image to `output`, replacing any existing file
    #[instrument(skip(self, output), fields(output = %output.display()))]
    pub async fn download_image(&self, url: &str, output: &Path) -> ClientResult<()> {
        let response = self.transport.get_bytes(url).await?;
        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                body: format!("Failed to download image from {}", url),
            });
        }

        debug!(bytes = response.bytes.len(), "Saving image");
        tokio::fs::write(output, &response.bytes).await?;
        Ok(())
    }

    async fn get_authorized(&self, url: &str) -> ClientResult<HttpResponse> {
        let mut state = RequestState::Authorized {
            token: self.auth.valid_token().await?,
            refreshed: false,
        };

        loop {
            state = match state {
                RequestState::Authorized { token, refreshed } => {
                    debug!(url, refreshed, "Sending request");
                    let response = self.transport.get(url, &token).await?;
                    if response.is_unauthorized() && !refreshed {
                        warn!("Got 401, refreshing token");
                        RequestState::NeedsRefresh
                    } else {
                        return Ok(response);
                    }
                }
                RequestState::NeedsRefresh => RequestState::Authorized {
                    token: self.auth.refresh().await?,
                    refreshed: true,
                },
            };
        }
    }
}
