use std::fmt::Write as FmtWrite;
use std::io::IsTerminal;
use std::process::ExitCode;

use figco_lib::output::FIGCO_OUTPUT_VERSION;
use figco_lib::{ErrorOutput, FigcoError, FigcoOutput, FileEntry};

use crate::cli::OutputFormat;

/// Write output to stdout in the requested format.
pub fn write_output(body: &FigcoOutput, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(body)?),
        OutputFormat::Pretty => write_pretty_output(body)?,
    };
    Ok(())
}

/// Write `body` to stdout and map a write failure into an error payload.
pub fn emit(body: &FigcoOutput, format: OutputFormat) -> ExitCode {
    match write_output(body, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => render_error(FigcoError::Unknown(err.to_string()), format),
    }
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: FigcoError, format: OutputFormat) -> ExitCode {
    tracing::debug!(error = %err, "command failed");
    let error_payload = err.to_payload();
    let payload = FigcoOutput::Error(ErrorOutput {
        version: FIGCO_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Human-readable on a terminal; indented JSON when piped.
fn write_pretty_output(body: &FigcoOutput) -> Result<(), serde_json::Error> {
    if std::io::stdout().is_terminal() {
        println!("{}", format_pretty(body, true));
    } else {
        println!("{}", serde_json::to_string_pretty(body)?);
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &FigcoOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        FigcoOutput::Fetch(out) => {
            let header = color("[FETCH]", "36", colorize);
            let title = out.name.as_deref().unwrap_or(out.file_key.as_str());
            writeln!(buf, "{} {} ({} nodes)", header, title, out.node_count).ok();
            writeln!(buf, "File key: {}", out.file_key).ok();
            if let Some(node_id) = &out.node_id {
                writeln!(buf, "Node: {}", node_id).ok();
            }
            if let Some(modified) = &out.last_modified {
                writeln!(buf, "Last modified: {}", modified).ok();
            }
            match &out.output_path {
                Some(path) => writeln!(buf, "Saved to: {}", path.display()).ok(),
                None => writeln!(buf, "Document inlined in JSON output (use --output to save)").ok(),
            };
        }
        FigcoOutput::Preview(out) => {
            let header = color("[PREVIEW]", "36", colorize);
            writeln!(
                buf,
                "{} {} @{}x ({})",
                header, out.node_id, out.scale, out.format
            )
            .ok();
            writeln!(buf, "Saved to: {} ({} bytes)", out.output_path.display(), out.bytes).ok();
            if let (Some(w), Some(h)) = (out.width, out.height) {
                writeln!(buf, "Size: {}x{}", w, h).ok();
            }
        }
        FigcoOutput::Generate(out) => {
            let header = color("[GENERATE]", "32", colorize);
            writeln!(
                buf,
                "{} {} ({} stack, {} nodes)",
                header, out.component_name, out.stack, out.node_count
            )
            .ok();
            writeln!(
                buf,
                "Input: {} (kind: {:?})",
                out.input.value, out.input.kind
            )
            .ok();
            writeln!(buf, "Output: {}", out.out_dir.display()).ok();
            writeln!(buf, "Files:").ok();
            for file in &out.files {
                writeln!(buf, "- {}", file.display()).ok();
            }
            if !out.images.is_empty() {
                writeln!(buf, "Images: {}", out.images.len()).ok();
            }
            if let Some(summary) = &out.summary {
                if !summary.warnings.is_empty() {
                    writeln!(buf, "{}", color("Warnings:", "33", colorize)).ok();
                    for warning in &summary.warnings {
                        writeln!(buf, "- {}", warning).ok();
                    }
                }
            }
        }
        FigcoOutput::Files(out) => {
            if let Some(file) = &out.file {
                let header = color("[FILE]", "34", colorize);
                writeln!(buf, "{} {}", header, file.path).ok();
                buf.push_str(&file.contents);
                if !file.contents.ends_with('\n') {
                    buf.push('\n');
                }
            }
            if let Some(tree) = &out.tree {
                let header = color("[FILES]", "34", colorize);
                writeln!(
                    buf,
                    "{} {} ({} files)",
                    header,
                    out.project.display(),
                    tree.file_count()
                )
                .ok();
                write_tree(&mut buf, tree, 0);
            }
        }
        FigcoOutput::Run(out) => {
            let header = color("[RUN]", "32", colorize);
            writeln!(buf, "{} {}", header, out.project.display()).ok();
            for step in &out.steps {
                writeln!(buf, "- {}", step).ok();
            }
        }
        FigcoOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or(out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

fn write_tree(buf: &mut String, entry: &FileEntry, depth: usize) {
    if let FileEntry::Folder { children, .. } = entry {
        for child in children {
            let suffix = if child.is_folder() { "/" } else { "" };
            writeln!(buf, "{}{}{}", "  ".repeat(depth), child.name(), suffix).ok();
            write_tree(buf, child, depth + 1);
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use figco_lib::output::{GenerateOutput, ResourceDescriptor, Summary};
    use figco_lib::{FilesOutput, ResourceKind, Stack};

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let code = render_error(FigcoError::Config("boom".to_string()), OutputFormat::Json);
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn format_pretty_lists_generated_files_and_warnings() {
        let output = FigcoOutput::Generate(GenerateOutput {
            version: FIGCO_OUTPUT_VERSION.to_string(),
            input: ResourceDescriptor {
                kind: ResourceKind::Json,
                value: "design.json".into(),
            },
            stack: Stack::Html,
            component_name: "Landing".into(),
            out_dir: PathBuf::from("site"),
            files: vec![PathBuf::from("site/index.html"), PathBuf::from("site/styles.css")],
            node_count: 7,
            images: Vec::new(),
            summary: Summary::from_warnings(vec!["Unsupported node type MEDIA".into()]),
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[GENERATE] Landing (html stack, 7 nodes)"));
        assert!(pretty.contains("- site/index.html"));
        assert!(pretty.contains("Warnings:"));
        assert!(pretty.contains("MEDIA"));
    }

    #[test]
    fn format_pretty_renders_tree_folders_first() {
        let tree = FileEntry::Folder {
            name: "out".into(),
            path: String::new(),
            children: vec![
                FileEntry::Folder {
                    name: "src".into(),
                    path: "src".into(),
                    children: vec![FileEntry::File {
                        name: "index.js".into(),
                        path: "src/index.js".into(),
                        size: 10,
                    }],
                },
                FileEntry::File {
                    name: "package.json".into(),
                    path: "package.json".into(),
                    size: 20,
                },
            ],
        };
        let output = FigcoOutput::Files(FilesOutput {
            version: FIGCO_OUTPUT_VERSION.to_string(),
            project: PathBuf::from("out"),
            tree: Some(tree),
            file: None,
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("(2 files)"));
        assert!(pretty.contains("src/\n  index.js\npackage.json"));
    }

    #[test]
    fn format_pretty_handles_errors() {
        let output = FigcoOutput::Error(ErrorOutput {
            version: FIGCO_OUTPUT_VERSION.to_string(),
            message: Some("bad input".to_string()),
            error: figco_lib::ErrorPayload {
                category: figco_lib::ErrorCategory::Config,
                message: "bad input".to_string(),
                remediation: Some("check flags".to_string()),
            },
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] bad input"));
        assert!(pretty.contains("Hint: check flags"));
    }
}
