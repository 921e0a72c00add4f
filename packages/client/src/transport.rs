use crate::error::ClientResult;
use std::future::Future;

/// Status and body of a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Status and raw bytes of a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl BinaryResponse {
    pub fn new(status: u16, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            bytes: bytes.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The requests the client makes. Non-2xx statuses are responses, not
/// errors; only a failed exchange is an `Err`.
pub trait HttpTransport: Send + Sync {
    /// GET with a bearer token
    fn get(
        &self,
        url: &str,
        token: &str,
    ) -> impl Future<Output = ClientResult<HttpResponse>> + Send;

    /// Unauthenticated GET of raw bytes, for pre-signed asset URLs
    fn get_bytes(&self, url: &str) -> impl Future<Output = ClientResult<BinaryResponse>> + Send;

    /// POST an `application/x-www-form-urlencoded` body
    fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> impl Future<Output = ClientResult<HttpResponse>> + Send;
}

/// [`HttpTransport`] over a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, token: &str) -> ClientResult<HttpResponse> {
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status().as_u16();
        Ok(HttpResponse::new(status, response.text().await?))
    }

    async fn get_bytes(&self, url: &str) -> ClientResult<BinaryResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        Ok(BinaryResponse::new(status, response.bytes().await?.to_vec()))
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> ClientResult<HttpResponse> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok(HttpResponse::new(status, response.text().await?))
    }
}
