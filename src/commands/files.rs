use std::path::PathBuf;
use std::process::ExitCode;

use figco_lib::output::FileContent;
use figco_lib::{
    read_project_file, read_project_tree, FigcoError, FigcoOutput, FilesOutput,
    FIGCO_OUTPUT_VERSION,
};

use crate::cli::OutputFormat;
use crate::formatting::{emit, render_error};

/// Run the files command: the project tree, or one file when `path` is set.
pub fn run_files(project: PathBuf, path: Option<String>, format: OutputFormat) -> ExitCode {
    match files(project, path) {
        Ok(body) => emit(&body, format),
        Err(err) => render_error(err, format),
    }
}

fn files(project: PathBuf, path: Option<String>) -> Result<FigcoOutput, FigcoError> {
    let (tree, file) = match path {
        Some(rel) => {
            let contents = read_project_file(&project, &rel)?;
            (
                None,
                Some(FileContent {
                    path: rel,
                    contents,
                }),
            )
        }
        None => (Some(read_project_tree(&project)?), None),
    };

    Ok(FigcoOutput::Files(FilesOutput {
        version: FIGCO_OUTPUT_VERSION.to_string(),
        project,
        tree,
        file,
    }))
}
