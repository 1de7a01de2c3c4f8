//! Loading a design tree out of the payload shapes Figma hands back.

use std::path::Path;

use serde_json::Value;

use super::api_types::{DesignNode, FigmaFile, FigmaNodesResponse};
use super::query::{find_node_by_id, normalize_node_id};
use crate::{FigcoError, Result};

/// A design tree ready for translation.
#[derive(Debug, Clone)]
pub struct DesignDocument {
    /// File name when the payload carried one.
    pub name: Option<String>,
    pub last_modified: Option<String>,
    pub root: DesignNode,
}

impl DesignDocument {
    /// Accepts a file response (`{document}`), a nodes response
    /// (`{nodes: {id: {document}}}`) or a bare node (`{type, ...}`).
    pub fn from_value(value: Value, node_id: Option<&str>) -> Result<Self> {
        let node_id = node_id.map(normalize_node_id);

        let doc = if value.get("document").is_some() {
            let file: FigmaFile = serde_json::from_value(value)?;
            Self::from_file(file)
        } else if value.get("nodes").is_some() {
            let nodes: FigmaNodesResponse = serde_json::from_value(value)?;
            Self::from_nodes(nodes, node_id.as_deref())?
        } else if value.get("type").is_some() {
            let root: DesignNode = serde_json::from_value(value)?;
            Self {
                name: None,
                last_modified: None,
                root,
            }
        } else {
            return Err(FigcoError::translate(
                "Unrecognised JSON: expected a Figma file, nodes response or node with a `type` field",
            ));
        };

        match node_id {
            Some(id) => doc.select(&id),
            None => Ok(doc),
        }
    }

    /// Read Figma JSON saved on disk.
    pub fn from_path(path: &Path, node_id: Option<&str>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_value(value, node_id)
    }

    pub fn from_file(file: FigmaFile) -> Self {
        Self {
            name: Some(file.name).filter(|n| !n.is_empty()),
            last_modified: file.last_modified,
            root: file.document,
        }
    }

    fn from_nodes(response: FigmaNodesResponse, node_id: Option<&str>) -> Result<Self> {
        let mut present: Vec<(String, DesignNode)> = response
            .nodes
            .into_iter()
            .filter_map(|(id, wrapper)| wrapper.map(|w| (id, w.document)))
            .collect();
        present.sort_by(|a, b| a.0.cmp(&b.0));

        let root = match node_id {
            Some(id) => present
                .into_iter()
                .find(|(key, _)| key == id)
                .map(|(_, node)| node)
                .ok_or_else(|| {
                    FigcoError::Config(format!("Node id {id} not found in nodes response"))
                })?,
            None if present.len() == 1 => present.remove(0).1,
            None if present.is_empty() => {
                return Err(FigcoError::translate("Nodes response contains no documents"))
            }
            None => {
                return Err(FigcoError::Config(format!(
                    "Nodes response holds {} nodes; pass --node-id to pick one",
                    present.len()
                )))
            }
        };

        Ok(Self {
            name: response.name,
            last_modified: response.last_modified,
            root,
        })
    }

    /// Narrow the document to the subtree rooted at `node_id`.
    pub fn select(self, node_id: &str) -> Result<Self> {
        let node_id = normalize_node_id(node_id);
        if self.root.id == node_id {
            return Ok(self);
        }
        let root = find_node_by_id(&self.root, &node_id)
            .cloned()
            .ok_or_else(|| FigcoError::Config(format!("Node id {node_id} not found in document")))?;
        Ok(Self { root, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::api_types::NodeKind;
    use serde_json::json;

    fn file_payload() -> Value {
        json!({
            "name": "Landing",
            "lastModified": "2024-01-01T00:00:00Z",
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "name": "Page 1",
                    "type": "CANVAS",
                    "children": [{ "id": "1:903", "name": "Hero", "type": "FRAME" }]
                }]
            }
        })
    }

    #[test]
    fn file_payload_yields_document_root() {
        let doc = DesignDocument::from_value(file_payload(), None).expect("doc");
        assert_eq!(doc.name.as_deref(), Some("Landing"));
        assert_eq!(doc.root.kind, NodeKind::Document);
    }

    #[test]
    fn node_id_with_dash_selects_subtree() {
        let doc = DesignDocument::from_value(file_payload(), Some("1-903")).expect("doc");
        assert_eq!(doc.root.name, "Hero");
        assert_eq!(doc.root.kind, NodeKind::Frame);
    }

    #[test]
    fn missing_node_id_is_config_error() {
        let err = DesignDocument::from_value(file_payload(), Some("7:7")).unwrap_err();
        assert!(matches!(err, FigcoError::Config(msg) if msg.contains("7:7")));
    }

    #[test]
    fn nodes_payload_with_single_entry_is_unwrapped() {
        let value = json!({
            "name": "Landing",
            "nodes": { "1:2": { "document": { "id": "1:2", "name": "Card", "type": "COMPONENT" } } }
        });
        let doc = DesignDocument::from_value(value, None).expect("doc");
        assert_eq!(doc.root.kind, NodeKind::Component);
    }

    #[test]
    fn nodes_payload_with_many_entries_needs_node_id() {
        let value = json!({
            "nodes": {
                "1:2": { "document": { "id": "1:2", "name": "A", "type": "FRAME" } },
                "1:3": { "document": { "id": "1:3", "name": "B", "type": "FRAME" } },
                "1:4": null
            }
        });
        assert!(DesignDocument::from_value(value.clone(), None).is_err());
        let doc = DesignDocument::from_value(value, Some("1:3")).expect("doc");
        assert_eq!(doc.root.name, "B");
    }

    #[test]
    fn bare_node_is_accepted() {
        let value = json!({ "id": "5:5", "name": "Label", "type": "TEXT", "characters": "Hi" });
        let doc = DesignDocument::from_value(value, None).expect("doc");
        assert_eq!(doc.root.characters.as_deref(), Some("Hi"));
        assert!(doc.name.is_none());
    }

    #[test]
    fn unrecognised_payload_is_rejected() {
        let err = DesignDocument::from_value(json!({ "hello": "world" }), None).unwrap_err();
        assert!(matches!(err, FigcoError::Translate(_)));
    }

    #[test]
    fn from_path_reads_json_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("design.json");
        std::fs::write(&path, file_payload().to_string()).expect("write");

        let doc = DesignDocument::from_path(&path, Some("1:903")).expect("doc");
        assert_eq!(doc.root.name, "Hero");

        let missing = DesignDocument::from_path(&dir.path().join("nope.json"), None);
        assert!(matches!(missing, Err(FigcoError::Io(_))));
    }
}
