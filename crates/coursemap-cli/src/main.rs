use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use coursemap_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod pipeline;

#[derive(Debug, Parser)]
#[command(name = "coursemap")]
#[command(about = "Turn a golf course spreadsheet into an interactive map")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Read the workbook and write the HTML map and JSON export
    Build(BuildArgs),
    /// Validate the workbook and print a summary without writing anything
    Check(SourceArgs),
}

#[derive(Debug, Clone, Default, Args)]
struct SourceArgs {
    /// Workbook to read (overrides COURSEMAP_INPUT)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Worksheet name; defaults to the first sheet
    #[arg(long)]
    sheet: Option<String>,
}

impl SourceArgs {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(input) = &self.input {
            config.input_path.clone_from(input);
        }
        if let Some(sheet) = &self.sheet {
            config.sheet_name = Some(sheet.clone());
        }
        config
    }
}

#[derive(Debug, Clone, Default, Args)]
struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// HTML output path (overrides COURSEMAP_HTML_OUT)
    #[arg(long)]
    html: Option<PathBuf>,
    /// JSON export path (overrides COURSEMAP_JSON_OUT)
    #[arg(long, conflicts_with = "no_json")]
    json: Option<PathBuf>,
    /// Skip the JSON export
    #[arg(long)]
    no_json: bool,
    /// Read and validate, report counts, write nothing
    #[arg(long)]
    dry_run: bool,
}

impl BuildArgs {
    fn apply(&self, config: AppConfig) -> AppConfig {
        let mut config = self.source.apply(config);
        if let Some(html) = &self.html {
            config.html_path.clone_from(html);
        }
        if let Some(json) = &self.json {
            config.json_path.clone_from(json);
            config.json_export = true;
        }
        if self.no_json {
            config.json_export = false;
        }
        config
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = coursemap_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    match cli
        .command
        .unwrap_or_else(|| Commands::Build(BuildArgs::default()))
    {
        Commands::Build(args) => pipeline::run_build(&args.apply(config), args.dry_run),
        Commands::Check(args) => pipeline::run_check(&args.apply(config)),
    }
}
