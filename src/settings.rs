use std::path::{Path, PathBuf};

use figco_lib::{Config, FigcoError, FigmaAuth, FigmaClient, Stack};
use tracing::debug;

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct GenerateFlagSources {
    pub stack: bool,
    pub download_images: bool,
}

impl GenerateFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            stack: flag_present(args, "--stack"),
            download_images: flag_present(args, "--download-images"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Resolved settings after merging CLI args and config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGenerateSettings {
    pub stack: Stack,
    pub out_dir: PathBuf,
    pub component_name: Option<String>,
    pub download_images: bool,
    pub image_concurrency: usize,
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
pub fn resolve_generate_settings(
    cli_stack: Stack,
    cli_out_dir: Option<PathBuf>,
    cli_component_name: Option<String>,
    cli_download_images: bool,
    config: &Config,
    flags: &GenerateFlagSources,
) -> ResolvedGenerateSettings {
    ResolvedGenerateSettings {
        stack: if flags.stack {
            cli_stack
        } else {
            config.generate.stack
        },
        out_dir: cli_out_dir.unwrap_or_else(|| config.generate.out_dir.clone()),
        component_name: cli_component_name
            .or_else(|| config.generate.component_name.clone())
            .filter(|name| !name.trim().is_empty()),
        download_images: if flags.download_images {
            cli_download_images
        } else {
            config.generate.download_images
        },
        image_concurrency: config.figma.image_concurrency,
    }
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/figco/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, FigcoError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        FigcoError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        FigcoError::Config(prefix)
    })?;

    debug!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "defaults/central".into()),
        base_url = %cfg.figma.base_url,
        timeout = ?cfg.figma.timeout,
        stack = %cfg.generate.stack,
        "effective config"
    );
    Ok(cfg)
}

/// Build an API client from `--token` or the environment.
pub fn figma_client(token: Option<String>, config: &Config) -> Result<FigmaClient, FigcoError> {
    let auth = FigmaAuth::resolve(token).ok_or_else(|| {
        FigcoError::Config(
            "Missing Figma token; set FIGMA_TOKEN or FIGMA_OAUTH_TOKEN, or pass --token"
                .to_string(),
        )
    })?;
    Ok(FigmaClient::with_base_url(
        auth,
        config.figma.base_url.as_str(),
        config.figma.timeout,
    )?)
}
