//! `npm install` + `npm start` for a generated React project.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::{FigcoError, Result};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// npm executable; `npm` on PATH by default.
    pub npm: PathBuf,
    pub skip_install: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            npm: PathBuf::from("npm"),
            skip_install: false,
        }
    }
}

/// Install dependencies then start the dev server, inheriting stdio.
/// Returns once `npm start` exits.
pub async fn run_project(dir: &Path, opts: &RunOptions) -> Result<Vec<String>> {
    if !dir.join("package.json").is_file() {
        return Err(FigcoError::Config(format!(
            "No package.json in {}; generate a react project first",
            dir.display()
        )));
    }

    let mut steps = Vec::new();
    if !opts.skip_install {
        run_npm(dir, &opts.npm, "install").await?;
        steps.push("install".to_string());
    }
    run_npm(dir, &opts.npm, "start").await?;
    steps.push("start".to_string());
    Ok(steps)
}

async fn run_npm(dir: &Path, npm: &Path, script: &str) -> Result<()> {
    info!(dir = %dir.display(), "npm {script}");
    let status = Command::new(npm)
        .arg(script)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| {
            FigcoError::Process(format!(
                "Failed to spawn {} {script}: {e}",
                npm.display()
            ))
        })?;

    if !status.success() {
        let code = status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(FigcoError::Process(format!(
            "{} {script} exited with status {code}",
            npm.display()
        )));
    }
    Ok(())
}
