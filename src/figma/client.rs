//! Figma API client for fetching file data and exporting images.

use crate::FigcoError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::api_types::{
    FigmaFile, FigmaImageExport, FigmaImageFills, FigmaNodesResponse, ImageFormat,
};

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FigmaError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Figma API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Missing access token")]
    MissingToken,
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

pub fn map_figma_error(e: FigmaError) -> FigcoError {
    match e {
        FigmaError::Request(req_err) => FigcoError::Network(req_err),
        FigmaError::Api { status, message } => FigcoError::FigmaApi {
            status: Some(
                reqwest::StatusCode::from_u16(status)
                    .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            ),
            message,
        },
        FigmaError::MissingToken => FigcoError::Config(
            "Missing Figma token; set FIGMA_TOKEN or FIGMA_OAUTH_TOKEN".to_string(),
        ),
        FigmaError::NodeNotFound(id) => FigcoError::FigmaApi {
            status: None,
            message: format!("Node not found: {}", id),
        },
        FigmaError::RateLimited(secs) => FigcoError::FigmaApi {
            status: Some(reqwest::StatusCode::TOO_MANY_REQUESTS),
            message: format!("Rate limited, retry after {} seconds", secs),
        },
    }
}

impl From<FigmaError> for FigcoError {
    fn from(err: FigmaError) -> Self {
        map_figma_error(err)
    }
}

#[derive(Debug, Clone)]
pub enum FigmaAuth {
    PersonalAccessToken(String),
    OAuthToken(String),
}

impl FigmaAuth {
    pub fn from_env() -> Option<Self> {
        if let Ok(token) = std::env::var("FIGMA_TOKEN") {
            if !token.is_empty() {
                return Some(Self::PersonalAccessToken(token));
            }
        }

        if let Ok(token) = std::env::var("FIGMA_OAUTH_TOKEN") {
            if !token.is_empty() {
                return Some(Self::OAuthToken(token));
            }
        }

        None
    }

    /// Explicit token wins over the environment.
    pub fn resolve(explicit: Option<String>) -> Option<Self> {
        match explicit {
            Some(token) if !token.trim().is_empty() => Some(Self::PersonalAccessToken(token)),
            _ => Self::from_env(),
        }
    }

    fn token(&self) -> &str {
        match self {
            FigmaAuth::PersonalAccessToken(token) | FigmaAuth::OAuthToken(token) => token,
        }
    }

    fn headers(&self) -> Result<HeaderMap, FigmaError> {
        let mut headers = HeaderMap::new();
        match self {
            FigmaAuth::PersonalAccessToken(token) => {
                headers.insert(
                    HeaderName::from_static("x-figma-token"),
                    HeaderValue::from_str(token).map_err(|_| FigmaError::MissingToken)?,
                );
            }
            FigmaAuth::OAuthToken(token) => {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", token))
                        .map_err(|_| FigmaError::MissingToken)?,
                );
            }
        }
        Ok(headers)
    }
}

#[derive(Debug, Clone)]
pub struct FigmaClient {
    client: reqwest::Client,
    base_url: String,
}

impl FigmaClient {
    pub fn new(access_token: impl Into<String>) -> Result<Self, FigmaError> {
        Self::from_auth(FigmaAuth::PersonalAccessToken(access_token.into()))
    }

    pub fn from_auth(auth: FigmaAuth) -> Result<Self, FigmaError> {
        Self::with_base_url(auth, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url(
        auth: FigmaAuth,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FigmaError> {
        if auth.token().is_empty() {
            return Err(FigmaError::MissingToken);
        }

        let client = reqwest::Client::builder()
            .default_headers(auth.headers()?)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_file(&self, file_key: &str) -> Result<FigmaFile, FigmaError> {
        let url = format!("{}/files/{}", self.base_url, file_key);
        self.get_json(&url).await
    }

    pub async fn get_file_nodes(
        &self,
        file_key: &str,
        node_ids: &[&str],
    ) -> Result<FigmaNodesResponse, FigmaError> {
        let ids = node_ids.join(",");
        let url = format!("{}/files/{}/nodes?ids={}", self.base_url, file_key, ids);
        self.get_json(&url).await
    }

    /// Untyped file (or single-node) payload, kept verbatim for `fetch`.
    pub async fn get_design_json(
        &self,
        file_key: &str,
        node_id: Option<&str>,
    ) -> Result<Value, FigmaError> {
        let url = match node_id {
            Some(id) => format!("{}/files/{}/nodes?ids={}", self.base_url, file_key, id),
            None => format!("{}/files/{}", self.base_url, file_key),
        };
        self.get_json(&url).await
    }

    /// Render a node and return the temporary URL Figma hosts the image at.
    pub async fn export_image(
        &self,
        file_key: &str,
        node_id: &str,
        format: ImageFormat,
        scale: f32,
    ) -> Result<String, FigmaError> {
        let url = format!(
            "{}/images/{}?ids={}&format={}&scale={}",
            self.base_url,
            file_key,
            node_id,
            format.as_str(),
            scale
        );

        let export: FigmaImageExport = self.get_json(&url).await?;
        if let Some(err) = export.err.filter(|e| !e.is_empty()) {
            return Err(FigmaError::Api {
                status: 400,
                message: err,
            });
        }

        export
            .images
            .get(node_id)
            .cloned()
            .flatten()
            .ok_or_else(|| FigmaError::NodeNotFound(node_id.to_string()))
    }

    /// Download URLs for every image fill in the file, keyed by image ref.
    pub async fn get_image_fills(&self, file_key: &str) -> Result<FigmaImageFills, FigmaError> {
        let url = format!("{}/files/{}/images", self.base_url, file_key);
        self.get_json(&url).await
    }

    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>, FigmaError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FigmaError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FigmaError> {
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, FigmaError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(FigmaError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FigmaError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Prefer the `err`/`error` field of a JSON error body over the raw text.
fn error_message(status: u16, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("err")
                .or_else(|| value.get("message"))
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        });

    match from_body {
        Some(msg) => msg,
        None if body.trim().is_empty() => format!("Figma API returned status {status}"),
        None => body.trim().to_string(),
    }
}
