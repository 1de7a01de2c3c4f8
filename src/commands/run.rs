use std::path::PathBuf;
use std::process::ExitCode;

use figco_lib::{run_project, FigcoOutput, RunOptions, RunOutput, FIGCO_OUTPUT_VERSION};

use crate::cli::OutputFormat;
use crate::formatting::{emit, render_error};

/// Run the run command. Blocks until `npm start` exits.
pub async fn run_run(
    project: PathBuf,
    npm: PathBuf,
    skip_install: bool,
    format: OutputFormat,
) -> ExitCode {
    let opts = RunOptions { npm, skip_install };
    match run_project(&project, &opts).await {
        Ok(steps) => emit(
            &FigcoOutput::Run(RunOutput {
                version: FIGCO_OUTPUT_VERSION.to_string(),
                project,
                steps,
            }),
            format,
        ),
        Err(err) => render_error(err, format),
    }
}
