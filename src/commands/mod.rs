mod fetch;
mod files;
mod generate;
mod preview;
mod run;

pub use fetch::run_fetch;
pub use files::run_files;
pub use generate::{run_generate, GenerateArgs};
pub use preview::{run_preview, PreviewArgs};
pub use run::run_run;

use figco_lib::{parse_resource, FigcoError, FigmaInfo, ResourceKind};

/// Resolve a `--file` argument to a Figma file key and node id.
/// An explicit `--node-id` wins over the one embedded in the URL.
pub(crate) fn figma_target(
    file: &str,
    node_id: Option<String>,
) -> Result<(String, FigmaInfo), FigcoError> {
    let parsed = parse_resource(file, Some(ResourceKind::Figma))
        .map_err(|e| FigcoError::Config(e.to_string()))?;
    let mut info = parsed
        .figma_info
        .ok_or_else(|| FigcoError::Config(format!("Figma file key missing in '{file}'")))?;
    if let Some(id) = node_id.filter(|id| !id.trim().is_empty()) {
        info.node_id = Some(figco_lib::figma::query::normalize_node_id(&id));
    }
    Ok((parsed.value, info))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figma_target_prefers_explicit_node_id() {
        let (_, info) = figma_target(
            "https://www.figma.com/design/ABCDEFGHIJ/Landing?node-id=1-2",
            Some("3-4".into()),
        )
        .expect("target");
        assert_eq!(info.file_key, "ABCDEFGHIJ");
        assert_eq!(info.node_id.as_deref(), Some("3:4"));
    }

    #[test]
    fn figma_target_accepts_bare_key() {
        let (value, info) = figma_target("ABCDEFGHIJ", None).expect("target");
        assert_eq!(value, "ABCDEFGHIJ");
        assert!(info.node_id.is_none());
    }
}
