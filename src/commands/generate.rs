use std::path::PathBuf;
use std::process::ExitCode;

use figco_lib::figma::query::{collect_image_refs, count_nodes, normalize_node_id};
use figco_lib::translate::component_name_for;
use figco_lib::{
    download_images, fetch_design, parse_resource, translate, write_project, Config,
    DesignDocument, FigcoError, FigcoOutput, GenerateOutput, ParsedResource, ProjectPlan,
    ResourceDescriptor, ResourceKind, Stack, Summary, TranslateOptions, FIGCO_OUTPUT_VERSION,
};
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;
use crate::formatting::{emit, render_error};
use crate::settings::{
    figma_client, load_config, resolve_generate_settings, GenerateFlagSources,
    ResolvedGenerateSettings,
};

pub struct GenerateArgs {
    pub input: String,
    pub input_type: Option<ResourceKind>,
    pub node_id: Option<String>,
    pub token: Option<String>,
    pub component_name: Option<String>,
    pub stack: Stack,
    pub out_dir: Option<PathBuf>,
    pub overwrite: bool,
    pub download_images: bool,
}

/// Run the generate command.
pub async fn run_generate(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    args: GenerateArgs,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    let settings = resolve_generate_settings(
        args.stack,
        args.out_dir.clone(),
        args.component_name.clone(),
        args.download_images,
        &config,
        &GenerateFlagSources::from_args(raw_args),
    );

    match generate(&config, &settings, args).await {
        Ok(body) => emit(&body, format),
        Err(err) => render_error(err, format),
    }
}

async fn generate(
    config: &Config,
    settings: &ResolvedGenerateSettings,
    args: GenerateArgs,
) -> Result<FigcoOutput, FigcoError> {
    debug!(input = %args.input, "parsing input resource");
    let resource = parse_resource(&args.input, args.input_type)
        .map_err(|e| FigcoError::Config(e.to_string()))?;
    let mut warnings = Vec::new();

    let (document, file_key) =
        load_document(config, &resource, args.node_id, args.token.clone()).await?;
    let root = &document.root;

    let stack = settings.stack;
    let opts = TranslateOptions {
        dialect: stack.dialect(),
        image_base: stack.image_base().to_string(),
    };
    let rendered = translate(root, &opts)?;
    warnings.extend(rendered.warnings.iter().cloned());

    let component_name = match &settings.component_name {
        Some(name) => component_name_for(name),
        None => component_name_for(default_component_source(&document)),
    };
    let plan = ProjectPlan::new(&rendered, &component_name, stack, &config.scaffold)?;
    let files = write_project(&plan, &settings.out_dir, args.overwrite)?;

    let mut images = Vec::new();
    if settings.download_images {
        let refs = collect_image_refs(root);
        match &file_key {
            Some(key) => {
                let client = figma_client(args.token, config)?;
                let dir = settings.out_dir.join(stack.images_dir());
                let report =
                    download_images(&client, key, &refs, &dir, settings.image_concurrency).await?;
                for image_ref in &report.missing {
                    warnings.push(format!("No download URL for image fill {image_ref}"));
                }
                for image_ref in &report.rejected {
                    warnings.push(format!("Skipped malformed image ref {image_ref:?}"));
                }
                images = report.downloaded;
            }
            None if refs.is_empty() => {}
            None => {
                warn!(refs = refs.len(), "image fills skipped for local JSON input");
                warnings.push(format!(
                    "Skipped {} image fill(s): --download-images needs a Figma URL or file key",
                    refs.len()
                ));
            }
        }
    }

    info!(
        component = %component_name,
        stack = %stack,
        out_dir = %settings.out_dir.display(),
        "generated project"
    );

    Ok(FigcoOutput::Generate(GenerateOutput {
        version: FIGCO_OUTPUT_VERSION.to_string(),
        input: ResourceDescriptor {
            kind: resource.kind,
            value: resource.value,
        },
        stack,
        component_name,
        out_dir: settings.out_dir.clone(),
        files,
        node_count: count_nodes(root),
        images,
        summary: Summary::from_warnings(warnings),
    }))
}

/// Load the design tree, returning the file key when it came from the API.
async fn load_document(
    config: &Config,
    resource: &ParsedResource,
    node_id: Option<String>,
    token: Option<String>,
) -> Result<(DesignDocument, Option<String>), FigcoError> {
    let cli_node_id = node_id
        .filter(|id| !id.trim().is_empty())
        .map(|id| normalize_node_id(&id));

    match resource.kind {
        ResourceKind::Json => {
            let path = PathBuf::from(&resource.value);
            let document = DesignDocument::from_path(&path, cli_node_id.as_deref())?;
            Ok((document, None))
        }
        ResourceKind::Figma => {
            let info = resource.figma_info.as_ref().ok_or_else(|| {
                FigcoError::Config(format!("Figma file key missing in '{}'", resource.value))
            })?;
            let node_id = cli_node_id.or_else(|| info.node_id.clone());
            let client = figma_client(token, config)?;
            let (_, document) = fetch_design(&client, &info.file_key, node_id.as_deref()).await?;
            Ok((document, Some(info.file_key.clone())))
        }
    }
}

/// Whole-file payloads are named after the file; subtrees after their root node.
fn default_component_source(document: &DesignDocument) -> &str {
    use figco_lib::figma::NodeKind;

    match (&document.root.kind, &document.name) {
        (NodeKind::Document, Some(name)) => name,
        _ => &document.root.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figco_lib::figma::NodeKind;
    use figco_lib::DesignNode;

    fn doc(kind: NodeKind, node_name: &str, file_name: Option<&str>) -> DesignDocument {
        DesignDocument {
            name: file_name.map(str::to_string),
            last_modified: None,
            root: DesignNode {
                kind,
                name: node_name.to_string(),
                ..DesignNode::default()
            },
        }
    }

    #[test]
    fn document_roots_are_named_after_the_file() {
        let d = doc(NodeKind::Document, "Document", Some("Marketing site"));
        assert_eq!(component_name_for(default_component_source(&d)), "MarketingSite");
    }

    #[test]
    fn subtrees_are_named_after_their_root() {
        let d = doc(NodeKind::Frame, "hero section", Some("Marketing site"));
        assert_eq!(component_name_for(default_component_source(&d)), "HeroSection");
    }
}
