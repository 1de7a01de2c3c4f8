use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum FigcoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Translation error: {0}")]
    Translate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl FigcoError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        FigcoError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn translate(message: impl Into<String>) -> Self {
        FigcoError::Translate(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            FigcoError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            FigcoError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            FigcoError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify URL/format (e.g., https://www.figma.com/design/<FILE_KEY>/...).",
            ),
            FigcoError::FigmaApi { status, message } => {
                let remediation = match status {
                    Some(StatusCode::FORBIDDEN) | Some(StatusCode::UNAUTHORIZED) => {
                        "Check that FIGMA_TOKEN is valid and has access to the file."
                    }
                    Some(StatusCode::NOT_FOUND) => "Check the file key and node id.",
                    _ => "Check FIGMA_TOKEN/URL and rate limits; retry after waiting.",
                };
                ErrorPayload::new(
                    ErrorCategory::Figma,
                    format!("Figma API error (status {:?}): {}", status, message),
                    remediation,
                )
            }
            FigcoError::Image(e) => ErrorPayload::new(
                ErrorCategory::Image,
                e.to_string(),
                "The exported image could not be decoded; try --image-format png.",
            ),
            FigcoError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check that the input is Figma JSON (a file, nodes or single node payload).",
            ),
            FigcoError::Translate(msg) => ErrorPayload::new(
                ErrorCategory::Translate,
                msg.to_string(),
                "Pass --node-id to pick a different node, or inspect the tree with `figco fetch`.",
            ),
            FigcoError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("figma token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) or pass --token before fetching from Figma.",
                    )
                } else if lower.contains("node-id") || lower.contains("node id") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Include a Figma node-id in the URL (e.g., ?node-id=1-2) or pass --node-id.",
                    )
                } else if lower.contains("file key") && lower.contains("figma") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a Figma URL with a file key: https://www.figma.com/design/<FILE_KEY>/... or the bare key.",
                    )
                } else if lower.contains("not empty") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Choose an empty --out-dir or pass --overwrite.",
                    )
                } else if lower.contains("outside the project") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a path relative to the project root without `..` segments.",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths (e.g., --stack react|html) and required tokens.",
                    )
                }
            }
            FigcoError::Process(msg) => {
                let remediation = if msg.to_ascii_lowercase().contains("spawn") {
                    "Install Node.js and ensure npm is on PATH (or pass --npm)."
                } else {
                    "Inspect the npm output above; rerun `figco run` once fixed."
                };
                ErrorPayload::new(ErrorCategory::Process, msg.to_string(), remediation)
            }
            FigcoError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, FigcoError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Figma,
    Image,
    Translate,
    Process,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
