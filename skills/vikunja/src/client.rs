//! HTTP client for the Vikunja API.

use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Result type for API calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from talking to the Vikunja API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required environment variable is unset or empty.
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

/// Client for the Vikunja REST API.
///
/// Holds the base URL and bearer token; all requests go through
/// [`ApiClient::request`], which returns the raw response body for the
/// resource modules to deserialize.
pub struct ApiClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Builds a client from `VIKUNJA_URL` and `VIKUNJA_TOKEN`.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = require_env("VIKUNJA_URL")?;
        let token = require_env("VIKUNJA_TOKEN")?;
        Self::new(base_url, token)
    }

    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            http,
        })
    }

    pub async fn get(&self, endpoint: &str) -> ClientResult<Vec<u8>> {
        self.request(Method::GET, endpoint, None::<&()>).await
    }

    pub async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> ClientResult<Vec<u8>> {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    pub async fn put<B: Serialize>(&self, endpoint: &str, body: &B) -> ClientResult<Vec<u8>> {
        self.request(Method::PUT, endpoint, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> ClientResult<Vec<u8>> {
        self.request(Method::DELETE, endpoint, None::<&()>).await
    }

    /// Performs a request and returns the raw response body.
    ///
    /// Any status of 400 or above becomes [`ClientError::Api`] carrying the
    /// body, which for Vikunja holds the API's own error message.
    async fn request<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ClientResult<Vec<u8>> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.as_u16() >= 400 {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

/// Loads `.env` before the environment is read: first from the directory
/// holding the binary (where the deploy step writes it), then from the
/// working directory. Existing variables win over file entries.
pub fn load_env() {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let _ = dotenvy::from_path(dir.join(".env"));
        }
    }
    let _ = dotenvy::dotenv();
}

fn require_env(name: &'static str) -> ClientResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ClientError::MissingEnv(name)),
    }
}
