mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noduleview", about = "Pulmonary nodule classification client")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what the viewer would do with a local file
    Info(commands::info::InfoArgs),
    /// Resolve the preview of a file or library item
    Preview(commands::preview::PreviewArgs),
    /// Classify a file or library item
    Classify(commands::classify::ClassifyArgs),
    /// Query the inference service
    Status(commands::status::StatusArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Status(args) => commands::status::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
