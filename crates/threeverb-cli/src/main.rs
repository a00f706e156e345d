//! ThreeVerb CLI - offline rendering and preset inspection.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "threeverb")]
#[command(author, version, about = "ThreeVerb reverb CLI", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file through the reverb
    Render(commands::render::RenderArgs),

    /// List the reverb parameters
    Params(commands::params::ParamsArgs),

    /// List presets or show one
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
