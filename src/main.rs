mod cli;
mod commands;
mod formatting;
mod logging;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{
    run_fetch, run_files, run_generate, run_preview, run_run, GenerateArgs, PreviewArgs,
};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    logging::setup_logging(args.verbose);

    match args.command {
        Commands::Fetch {
            file,
            node_id,
            token,
            output,
            format,
        } => run_fetch(args.config, file, node_id, token, output, format).await,
        Commands::Preview {
            file,
            node_id,
            token,
            scale,
            image_format,
            output,
            format,
        } => {
            run_preview(
                args.config,
                PreviewArgs {
                    file,
                    node_id,
                    token,
                    scale,
                    image_format: image_format.into(),
                    output,
                },
                format,
            )
            .await
        }
        Commands::Generate {
            input,
            input_type,
            node_id,
            token,
            component_name,
            stack,
            out_dir,
            overwrite,
            download_images,
            format,
        } => {
            run_generate(
                &raw_args,
                args.config,
                GenerateArgs {
                    input,
                    input_type: input_type.map(Into::into),
                    node_id,
                    token,
                    component_name,
                    stack: stack.into(),
                    out_dir,
                    overwrite,
                    download_images,
                },
                format,
            )
            .await
        }
        Commands::Files {
            project,
            path,
            format,
        } => run_files(project, path, format),
        Commands::Run {
            project,
            skip_install,
            npm,
            format,
        } => run_run(project, npm, skip_install, format).await,
    }
}
