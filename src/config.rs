use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::figma::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::scaffold::Stack;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub figma: FigmaConfig,
    pub generate: GenerateConfig,
    pub scaffold: ScaffoldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigmaConfig {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Export scale for `preview`.
    pub image_scale: f32,
    /// Concurrent image-fill downloads during `generate`.
    pub image_concurrency: usize,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            image_scale: 2.0,
            image_concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub stack: Stack,
    pub out_dir: PathBuf,
    pub component_name: Option<String>,
    pub download_images: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            stack: Stack::React,
            out_dir: PathBuf::from("generated"),
            component_name: None,
            download_images: false,
        }
    }
}

/// Versions and metadata written into generated projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub project_name: String,
    pub title: String,
    pub react_version: String,
    pub react_dom_version: String,
    pub react_scripts_version: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            project_name: "figma-react-app".to_string(),
            title: "Figma React App".to_string(),
            react_version: "^18.2.0".to_string(),
            react_dom_version: "^18.2.0".to_string(),
            react_scripts_version: "5.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, else the central config file if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::central_config_path().filter(|p| p.is_file()),
        };
        match path {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    /// `$XDG_CONFIG_HOME/figco/config.toml`, falling back to `~/.config`.
    pub fn central_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("figco").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.figma.base_url.trim().is_empty() {
            return Err("figma.base_url must not be empty".to_string());
        }
        if self.figma.image_scale.is_nan() || self.figma.image_scale <= 0.0 {
            return Err(format!(
                "figma.image_scale must be greater than zero (got {})",
                self.figma.image_scale
            ));
        }
        if self.figma.image_concurrency == 0 {
            return Err("figma.image_concurrency must be at least 1".to_string());
        }
        if self.figma.timeout.is_zero() {
            return Err("figma.timeout must be greater than zero".to_string());
        }
        if self.scaffold.project_name.trim().is_empty() {
            return Err("scaffold.project_name must not be empty".to_string());
        }
        Ok(())
    }
}
