use std::path::PathBuf;
use std::process::ExitCode;

use figco_lib::figma::query::count_nodes;
use figco_lib::{
    fetch_design, FetchOutput, FigcoError, FigcoOutput, ResourceDescriptor, ResourceKind,
    FIGCO_OUTPUT_VERSION,
};
use tracing::info;

use crate::cli::OutputFormat;
use crate::formatting::{emit, render_error};
use crate::settings::{figma_client, load_config};

/// Run the fetch command.
pub async fn run_fetch(
    config_path: Option<PathBuf>,
    file: String,
    node_id: Option<String>,
    token: Option<String>,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    match fetch(config_path, file, node_id, token, output).await {
        Ok(body) => emit(&body, format),
        Err(err) => render_error(err, format),
    }
}

async fn fetch(
    config_path: Option<PathBuf>,
    file: String,
    node_id: Option<String>,
    token: Option<String>,
    output: Option<PathBuf>,
) -> Result<FigcoOutput, FigcoError> {
    let config = load_config(config_path.as_deref())?;
    let (value, target) = super::figma_target(&file, node_id)?;
    let client = figma_client(token, &config)?;

    let (raw, document) = fetch_design(&client, &target.file_key, target.node_id.as_deref()).await?;
    let node_count = count_nodes(&document.root);

    let document_json = match &output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_string_pretty(&raw)?)?;
            info!(path = %path.display(), nodes = node_count, "saved design JSON");
            None
        }
        None => Some(raw),
    };

    Ok(FigcoOutput::Fetch(FetchOutput {
        version: FIGCO_OUTPUT_VERSION.to_string(),
        input: ResourceDescriptor {
            kind: ResourceKind::Figma,
            value,
        },
        file_key: target.file_key,
        node_id: target.node_id,
        name: document.name,
        last_modified: document.last_modified,
        node_count,
        output_path: output,
        document: document_json,
    }))
}
