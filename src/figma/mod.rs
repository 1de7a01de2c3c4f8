//! Figma integration: REST client, node model and tree queries.
//!
//! This module provides:
//! - [`FigmaClient`] - HTTP client for the Figma REST API
//! - [`DesignDocument`] - a node tree loaded from any Figma JSON payload
//! - [`query`] - read-only helpers over node trees
//! - API types for parsing Figma JSON responses

pub mod api_types;
pub mod client;
pub mod document;
pub mod query;

#[cfg(test)]
mod tests;

// Re-export primary public API
pub use client::{map_figma_error, FigmaAuth, FigmaClient, FigmaError};
pub use document::DesignDocument;

// Re-export API types that may be needed externally
pub use api_types::{
    DesignNode, FigmaBoundingBox, FigmaColor, FigmaFile, FigmaImageExport, FigmaImageFills,
    FigmaNodesResponse, FigmaTypeStyle, ImageFormat, NodeKind, Paint, PaintType,
};

use serde_json::Value;
use tracing::debug;

use crate::Result;

/// Fetch a design from the API, returning both the raw payload and the
/// parsed document narrowed to `node_id` when given.
pub async fn fetch_design(
    client: &FigmaClient,
    file_key: &str,
    node_id: Option<&str>,
) -> Result<(Value, DesignDocument)> {
    let node_id = node_id.map(query::normalize_node_id);
    let raw = client
        .get_design_json(file_key, node_id.as_deref())
        .await
        .map_err(map_figma_error)?;
    let document = DesignDocument::from_value(raw.clone(), node_id.as_deref())?;
    debug!(
        file_key = %file_key,
        root = %document.root.id,
        nodes = query::count_nodes(&document.root),
        "fetched design"
    );
    Ok((raw, document))
}
