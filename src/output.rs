use crate::error::ErrorPayload;
use crate::resource::ResourceKind;
use crate::scaffold::{DownloadedImage, FileEntry, Stack};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schema version for output payloads.
pub const FIGCO_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FigcoOutput {
    Fetch(FetchOutput),
    Preview(PreviewOutput),
    Generate(GenerateOutput),
    Files(FilesOutput),
    Run(RunOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Summary {
    /// `None` when there is nothing to report.
    pub fn from_warnings(warnings: Vec<String>) -> Option<Self> {
        if warnings.is_empty() {
            None
        } else {
            Some(Self { warnings })
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutput {
    pub version: String,
    pub input: ResourceDescriptor,
    pub file_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    pub node_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Raw payload, inlined only when not written to a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOutput {
    pub version: String,
    pub input: ResourceDescriptor,
    pub file_key: String,
    pub node_id: String,
    pub format: String,
    pub scale: f32,
    pub image_url: String,
    pub output_path: PathBuf,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub version: String,
    pub input: ResourceDescriptor,
    pub stack: Stack,
    pub component_name: String,
    pub out_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub node_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<DownloadedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesOutput {
    pub version: String,
    pub project: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<FileEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub version: String,
    pub project: PathBuf,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn input() -> ResourceDescriptor {
        ResourceDescriptor {
            kind: ResourceKind::Figma,
            value: "ABCDEFGHIJKL".to_string(),
        }
    }

    #[test]
    fn generate_output_serializes() {
        let output = FigcoOutput::Generate(GenerateOutput {
            version: FIGCO_OUTPUT_VERSION.to_string(),
            input: input(),
            stack: Stack::React,
            component_name: "Landing".to_string(),
            out_dir: PathBuf::from("generated"),
            files: vec![PathBuf::from("generated/package.json")],
            node_count: 12,
            images: Vec::new(),
            summary: Summary::from_warnings(vec!["Unsupported node type MEDIA".into()]),
        });

        let json = serde_json::to_string(&output).expect("serialize generate output");
        assert!(json.contains("\"mode\":\"generate\""));
        assert!(json.contains("\"stack\":\"react\""));
        assert!(json.contains("\"componentName\":\"Landing\""));
        assert!(json.contains("\"kind\":\"figma\""));
        assert!(!json.contains("\"images\""));
        assert!(json.contains("MEDIA"));
    }

    #[test]
    fn fetch_output_omits_document_when_written_to_file() {
        let output = FigcoOutput::Fetch(FetchOutput {
            version: FIGCO_OUTPUT_VERSION.to_string(),
            input: input(),
            file_key: "ABCDEFGHIJKL".to_string(),
            node_id: Some("1:2".to_string()),
            name: None,
            last_modified: None,
            node_count: 3,
            output_path: Some(PathBuf::from("design.json")),
            document: None,
        });
        let json = serde_json::to_string(&output).expect("serialize fetch output");
        assert!(json.contains("\"mode\":\"fetch\""));
        assert!(json.contains("\"nodeId\":\"1:2\""));
        assert!(!json.contains("\"document\""));
    }

    #[test]
    fn error_output_serializes() {
        let output = FigcoOutput::Error(ErrorOutput {
            version: FIGCO_OUTPUT_VERSION.to_string(),
            message: Some("boom".to_string()),
            error: ErrorPayload::new(ErrorCategory::Process, "boom".to_string(), "retry"),
        });
        let json = serde_json::to_string(&output).expect("serialize error output");
        assert!(json.contains("\"mode\":\"error\""));
        assert!(json.contains("\"category\":\"process\""));
    }

    #[test]
    fn summary_is_none_without_warnings() {
        assert!(Summary::from_warnings(Vec::new()).is_none());
    }
}
