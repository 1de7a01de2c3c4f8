use clap::{Parser, Subcommand, ValueEnum};
use figco_lib::figma::ImageFormat;
use figco_lib::{ResourceKind, Stack};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "figco")]
#[command(
    version,
    about = "Figco - Fetch Figma designs and scaffold front-end projects from them",
    long_about = "Figco\n\nModes:\n- fetch: download the raw JSON of a Figma file or node.\n- preview: render a node to an image through the Figma images API.\n- generate: translate a node tree into a React or HTML + CSS project.\n- files: list or read files of a generated project.\n- run: npm install && npm start inside a generated project.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with [figma], [generate] and [scaffold] defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the raw JSON of a Figma file (or a single node)
    Fetch {
        #[arg(long, help = "Figma URL or file key")]
        file: String,

        #[arg(long, help = "Node id (1:2 or 1-2); overrides the URL's node-id")]
        node_id: Option<String>,

        #[arg(long, help = "Figma token (defaults to FIGMA_TOKEN / FIGMA_OAUTH_TOKEN)")]
        token: Option<String>,

        #[arg(long, short, help = "Write the raw JSON here instead of inlining it")]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Render a Figma node to an image file
    Preview {
        #[arg(long, help = "Figma URL or file key")]
        file: String,

        #[arg(long, help = "Node id (1:2 or 1-2); overrides the URL's node-id")]
        node_id: Option<String>,

        #[arg(long, help = "Figma token (defaults to FIGMA_TOKEN / FIGMA_OAUTH_TOKEN)")]
        token: Option<String>,

        #[arg(long, help = "Export scale (defaults to figma.image_scale from config)")]
        scale: Option<f32>,

        #[arg(long, value_enum, default_value = "png", help = "Image format")]
        image_format: ImageFormatArg,

        #[arg(long, short, help = "Where to write the rendered image")]
        output: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Translate a design into a scaffolded project
    Generate {
        #[arg(long, help = "Input resource (Figma URL, file key, or local .json)")]
        input: String,

        #[arg(long, value_enum, help = "Override type detection for input")]
        input_type: Option<InputTypeArg>,

        #[arg(long, help = "Node id to translate (1:2 or 1-2)")]
        node_id: Option<String>,

        #[arg(long, help = "Figma token (defaults to FIGMA_TOKEN / FIGMA_OAUTH_TOKEN)")]
        token: Option<String>,

        #[arg(long, help = "Component name (defaults to the node name in PascalCase)")]
        component_name: Option<String>,

        #[arg(long, value_enum, default_value = "react", help = "Output stack")]
        stack: StackArg,

        #[arg(long, value_name = "DIR", help = "Output directory (default: generated)")]
        out_dir: Option<PathBuf>,

        #[arg(long, help = "Write into a non-empty output directory")]
        overwrite: bool,

        #[arg(long, help = "Download image fills into the project (Figma input only)")]
        download_images: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// List a generated project, or print one of its files
    Files {
        #[arg(long, value_name = "DIR", help = "Project directory")]
        project: PathBuf,

        #[arg(long, value_name = "REL", help = "File to print, relative to the project")]
        path: Option<String>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Install dependencies and start a generated React project
    Run {
        #[arg(long, value_name = "DIR", help = "Project directory")]
        project: PathBuf,

        #[arg(long, help = "Skip `npm install`")]
        skip_install: bool,

        #[arg(long, value_name = "BIN", default_value = "npm", help = "npm executable")]
        npm: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputTypeArg {
    Figma,
    Json,
}

impl From<InputTypeArg> for ResourceKind {
    fn from(arg: InputTypeArg) -> Self {
        match arg {
            InputTypeArg::Figma => ResourceKind::Figma,
            InputTypeArg::Json => ResourceKind::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StackArg {
    #[value(alias = "react-js", alias = "reactjs")]
    React,
    #[value(alias = "html+css")]
    Html,
}

impl From<StackArg> for Stack {
    fn from(arg: StackArg) -> Self {
        match arg {
            StackArg::React => Stack::React,
            StackArg::Html => Stack::Html,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ImageFormatArg {
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl From<ImageFormatArg> for ImageFormat {
    fn from(arg: ImageFormatArg) -> Self {
        match arg {
            ImageFormatArg::Png => ImageFormat::Png,
            ImageFormatArg::Jpg => ImageFormat::Jpg,
            ImageFormatArg::Svg => ImageFormat::Svg,
            ImageFormatArg::Pdf => ImageFormat::Pdf,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat, StackArg};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn generate_command_uses_defaults() {
        let cli = Cli::parse_from(["figco", "generate", "--input", "design.json"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Generate {
                input,
                input_type,
                node_id,
                component_name,
                stack,
                out_dir,
                overwrite,
                download_images,
                format,
                ..
            } => {
                assert_eq!(input, "design.json");
                assert!(input_type.is_none());
                assert!(node_id.is_none());
                assert!(component_name.is_none());
                assert!(matches!(stack, StackArg::React));
                assert!(out_dir.is_none());
                assert!(!overwrite);
                assert!(!download_images);
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn stack_aliases_are_accepted() {
        let cli = Cli::parse_from([
            "figco",
            "generate",
            "--input",
            "design.json",
            "--stack",
            "html+css",
        ]);
        match cli.command {
            Commands::Generate { stack, .. } => assert!(matches!(stack, StackArg::Html)),
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from([
            "figco",
            "files",
            "--project",
            "out",
            "--path",
            "src/index.js",
            "--verbose",
            "--config",
            "figco.toml",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("figco.toml")));
        match cli.command {
            Commands::Files { project, path, .. } => {
                assert_eq!(project, PathBuf::from("out"));
                assert_eq!(path.as_deref(), Some("src/index.js"));
            }
            _ => panic!("expected files command"),
        }
    }

    #[test]
    fn preview_requires_output() {
        let result = Cli::try_parse_from(["figco", "preview", "--file", "ABCDEFGHIJKL"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_defaults_to_npm() {
        let cli = Cli::parse_from(["figco", "run", "--project", "out"]);
        match cli.command {
            Commands::Run {
                npm, skip_install, ..
            } => {
                assert_eq!(npm, PathBuf::from("npm"));
                assert!(!skip_install);
            }
            _ => panic!("expected run command"),
        }
    }
}
