//! Generated project layout and the local operations on it.
//!
//! A [`ProjectPlan`] is computed in memory from a translated component and
//! written in one step by [`write_project`]. The remaining helpers inspect or
//! run a project that already exists on disk.

pub mod images;
pub mod runner;
pub mod templates;
pub mod tree;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ScaffoldConfig;
use crate::translate::{Dialect, RenderedComponent};
use crate::{FigcoError, Result};

pub use images::{download_images, image_file_name, DownloadedImage, ImageDownloadReport};
pub use runner::{run_project, RunOptions};
pub use tree::{read_project_file, read_project_tree, FileEntry};

/// Target front-end stack of a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Stack {
    #[default]
    React,
    Html,
}

impl Stack {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stack::React => "react",
            Stack::Html => "html",
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Stack::React => Dialect::Jsx,
            Stack::Html => Dialect::Html,
        }
    }

    /// URL prefix the markup uses for downloaded image fills.
    pub fn image_base(&self) -> &'static str {
        match self {
            Stack::React => "/images",
            Stack::Html => "images",
        }
    }

    /// Directory, relative to the project root, where image fills are stored.
    pub fn images_dir(&self) -> &'static str {
        match self {
            Stack::React => "public/images",
            Stack::Html => "images",
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stack {
    type Err = FigcoError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "react" | "react-js" | "reactjs" => Ok(Stack::React),
            "html" | "html+css" => Ok(Stack::Html),
            other => Err(FigcoError::Config(format!(
                "Unsupported stack '{other}'; supported: react, html"
            ))),
        }
    }
}

impl TryFrom<String> for Stack {
    type Error = FigcoError;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<Stack> for String {
    fn from(stack: Stack) -> Self {
        stack.as_str().to_string()
    }
}

/// One file of a project, path relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    #[serde(skip)]
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub stack: Stack,
    pub component_name: String,
    pub files: Vec<GeneratedFile>,
}

impl ProjectPlan {
    pub fn new(
        rendered: &RenderedComponent,
        component_name: &str,
        stack: Stack,
        cfg: &ScaffoldConfig,
    ) -> Result<Self> {
        if rendered.dialect != stack.dialect() {
            return Err(FigcoError::translate(format!(
                "Component was rendered as {:?} but the {stack} stack needs {:?}",
                rendered.dialect,
                stack.dialect()
            )));
        }

        let file = |path: String, contents: String| GeneratedFile {
            path: PathBuf::from(path),
            contents,
        };

        let files = match stack {
            Stack::React => vec![
                file("package.json".into(), templates::package_json(cfg)),
                file(
                    "public/index.html".into(),
                    templates::react_index_html(cfg),
                ),
                file(
                    "src/index.js".into(),
                    templates::react_index_js(component_name),
                ),
                file(
                    format!("src/components/{component_name}.js"),
                    templates::react_component(component_name, rendered),
                ),
                file(
                    format!("src/components/{component_name}.css"),
                    templates::stylesheet(rendered),
                ),
            ],
            Stack::Html => vec![
                file("index.html".into(), templates::html_page(cfg, rendered)),
                file("styles.css".into(), templates::stylesheet(rendered)),
            ],
        };

        Ok(Self {
            stack,
            component_name: component_name.to_string(),
            files,
        })
    }

    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == Path::new(path))
    }
}

/// Write every planned file under `out_dir`. Refuses a non-empty directory
/// unless `overwrite` is set; returns the paths written.
pub fn write_project(plan: &ProjectPlan, out_dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    if out_dir.exists() {
        if !out_dir.is_dir() {
            return Err(FigcoError::Config(format!(
                "Output path {} exists and is not a directory",
                out_dir.display()
            )));
        }
        let non_empty = std::fs::read_dir(out_dir)?.next().is_some();
        if non_empty && !overwrite {
            return Err(FigcoError::Config(format!(
                "Output directory {} is not empty",
                out_dir.display()
            )));
        }
    }

    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(plan.files.len());
    for file in &plan.files {
        let target = out_dir.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, file.contents.as_bytes())?;
        debug!(path = %target.display(), bytes = file.contents.len(), "wrote file");
        written.push(target);
    }
    info!(
        dir = %out_dir.display(),
        files = written.len(),
        stack = %plan.stack,
        "project written"
    );
    Ok(written)
}
