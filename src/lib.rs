//! Figco Library
//!
//! Fetches design documents from the Figma REST API and translates their node
//! trees into scaffolded front-end projects (React or plain HTML + CSS).
//!
//! # Module Overview
//!
//! - [`figma`] - Figma API client, node model and tree queries
//! - [`translate`] - Node tree to markup + stylesheet translation
//! - [`scaffold`] - Generated project layout, image downloads, npm runner
//! - [`config`] - Configuration file support
//! - [`resource`] - Input parsing (Figma URLs, file keys, local JSON)
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use figco_lib::{translate, DesignDocument, ProjectPlan, Stack, TranslateOptions};
//! use figco_lib::config::ScaffoldConfig;
//!
//! # fn example() -> figco_lib::Result<()> {
//! let document = DesignDocument::from_path("design.json".as_ref(), None)?;
//! let stack = Stack::React;
//! let opts = TranslateOptions {
//!     dialect: stack.dialect(),
//!     image_base: stack.image_base().to_string(),
//! };
//! let rendered = translate(&document.root, &opts)?;
//! let plan = ProjectPlan::new(&rendered, "Landing", stack, &ScaffoldConfig::default())?;
//! figco_lib::write_project(&plan, "generated".as_ref(), false)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod figma;
pub mod output;
pub mod resource;
pub mod scaffold;
pub mod translate;

pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, FigcoError, Result};
pub use figma::{fetch_design, DesignDocument, DesignNode, FigmaAuth, FigmaClient, FigmaError};
pub use output::{
    ErrorOutput, FetchOutput, FigcoOutput, FileContent, FilesOutput, GenerateOutput,
    PreviewOutput, ResourceDescriptor, RunOutput, Summary, FIGCO_OUTPUT_VERSION,
};
pub use resource::{parse_resource, FigmaInfo, ParsedResource, ResourceKind};
pub use scaffold::{
    download_images, read_project_file, read_project_tree, run_project, write_project,
    FileEntry, ProjectPlan, RunOptions, Stack,
};
pub use translate::{translate, Dialect, RenderedComponent, TranslateOptions};
