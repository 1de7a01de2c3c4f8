use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::figma::query::normalize_node_id;

/// Where a design comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Figma URL or bare file key, fetched through the REST API.
    Figma,
    /// Figma JSON saved on disk.
    Json,
}

#[derive(Debug, Clone)]
pub struct ParsedResource {
    pub kind: ResourceKind,
    pub value: String,
    pub figma_info: Option<FigmaInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigmaInfo {
    pub file_key: String,
    pub node_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ResourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include https:// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Not a Figma URL: '{url}'. Hint: use https://www.figma.com/design/<FILE_KEY>/...")]
    NotFigma { url: String },
    #[error("Figma URL missing file key in '{url}'. Hint: use https://www.figma.com/file/<FILE_KEY>/... and node-id if needed.")]
    FigmaMissingFileKey { url: String },
    #[error("Local file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported input '{value}'. Expected a Figma URL, a Figma file key, or a .json file.")]
    Unrecognized { value: String },
}

/// Figma file keys are opaque alphanumeric ids; anything this long with no
/// path separators is taken for one.
const MIN_FILE_KEY_LEN: usize = 10;

pub fn parse_resource(
    value: &str,
    override_type: Option<ResourceKind>,
) -> Result<ParsedResource, ResourceParseError> {
    let value = value.trim();
    match override_type {
        Some(ResourceKind::Figma) => {
            let figma_info = if is_http(value) {
                parse_figma_url(value)?
            } else {
                FigmaInfo {
                    file_key: value.to_string(),
                    node_id: None,
                }
            };
            return Ok(figma_resource(value, figma_info));
        }
        Some(ResourceKind::Json) => return parse_local_json(value),
        None => {}
    }

    if is_http(value) {
        parse_url_resource(value)
    } else if has_json_extension(value) {
        parse_local_json(value)
    } else if looks_like_file_key(value) {
        Ok(figma_resource(
            value,
            FigmaInfo {
                file_key: value.to_string(),
                node_id: None,
            },
        ))
    } else {
        Err(ResourceParseError::Unrecognized {
            value: value.to_string(),
        })
    }
}

fn figma_resource(value: &str, figma_info: FigmaInfo) -> ParsedResource {
    ParsedResource {
        kind: ResourceKind::Figma,
        value: value.to_string(),
        figma_info: Some(figma_info),
    }
}

fn is_http(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn has_json_extension(value: &str) -> bool {
    Path::new(value)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn looks_like_file_key(value: &str) -> bool {
    value.len() >= MIN_FILE_KEY_LEN && value.chars().all(|c| c.is_ascii_alphanumeric())
}

fn parse_url_resource(value: &str) -> Result<ParsedResource, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().unwrap_or("");
    if !host.contains("figma.com") {
        return Err(ResourceParseError::NotFigma {
            url: value.to_string(),
        });
    }
    let figma_info = parse_figma_url(value)?;
    Ok(figma_resource(value, figma_info))
}

fn parse_figma_url(value: &str) -> Result<FigmaInfo, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    let file_key = path_segments
        .iter()
        .position(|&s| s == "file" || s == "design" || s == "proto")
        .and_then(|i| path_segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ResourceParseError::FigmaMissingFileKey {
            url: value.to_string(),
        })?;

    let node_id = url
        .query_pairs()
        .find(|(k, _)| k == "node-id")
        .map(|(_, v)| normalize_node_id(&v));

    Ok(FigmaInfo { file_key, node_id })
}

fn parse_local_json(value: &str) -> Result<ParsedResource, ResourceParseError> {
    let path = Path::new(value);
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(ResourceParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }

    Ok(ParsedResource {
        kind: ResourceKind::Json,
        value: value.to_string(),
        figma_info: None,
    })
}
