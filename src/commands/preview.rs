use std::path::{Path, PathBuf};
use std::process::ExitCode;

use figco_lib::figma::ImageFormat;
use figco_lib::{
    FigcoError, FigcoOutput, PreviewOutput, ResourceDescriptor, ResourceKind,
    FIGCO_OUTPUT_VERSION,
};
use tracing::info;

use crate::cli::OutputFormat;
use crate::formatting::{emit, render_error};
use crate::settings::{figma_client, load_config};

pub struct PreviewArgs {
    pub file: String,
    pub node_id: Option<String>,
    pub token: Option<String>,
    pub scale: Option<f32>,
    pub image_format: ImageFormat,
    pub output: PathBuf,
}

/// Run the preview command.
pub async fn run_preview(
    config_path: Option<PathBuf>,
    args: PreviewArgs,
    format: OutputFormat,
) -> ExitCode {
    match preview(config_path, args).await {
        Ok(body) => emit(&body, format),
        Err(err) => render_error(err, format),
    }
}

async fn preview(config_path: Option<PathBuf>, args: PreviewArgs) -> Result<FigcoOutput, FigcoError> {
    let config = load_config(config_path.as_deref())?;
    let (value, target) = super::figma_target(&args.file, args.node_id)?;
    let node_id = target.node_id.ok_or_else(|| {
        FigcoError::Config(
            "Preview needs a node id; add ?node-id=1-2 to the URL or pass --node-id".to_string(),
        )
    })?;
    let scale = args.scale.unwrap_or(config.figma.image_scale);
    if scale.is_nan() || scale <= 0.0 {
        return Err(FigcoError::Config(format!(
            "--scale must be greater than zero (got {scale})"
        )));
    }

    let client = figma_client(args.token, &config)?;
    let image_url = client
        .export_image(&target.file_key, &node_id, args.image_format, scale)
        .await?;
    let bytes = client.download_image(&image_url).await?;
    write_image(&args.output, &bytes)?;
    info!(path = %args.output.display(), bytes = bytes.len(), "saved preview");

    let (width, height) = if args.image_format.is_raster() {
        let img = image::load_from_memory(&bytes)?;
        (Some(img.width()), Some(img.height()))
    } else {
        (None, None)
    };

    Ok(FigcoOutput::Preview(PreviewOutput {
        version: FIGCO_OUTPUT_VERSION.to_string(),
        input: ResourceDescriptor {
            kind: ResourceKind::Figma,
            value,
        },
        file_key: target.file_key,
        node_id,
        format: args.image_format.as_str().to_string(),
        scale,
        image_url,
        output_path: args.output,
        bytes: bytes.len(),
        width,
        height,
    }))
}

fn write_image(path: &Path, bytes: &[u8]) -> Result<(), FigcoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
