//! docbundle CLI - documentation bundle compiler.
//!
//! Provides commands for:
//! - `build`: Compile the docs tree and write the JSON bundle
//! - `outline`: Compile the docs tree and print its ordered outline

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, OutlineArgs};
use output::Output;

/// docbundle - compile a documentation tree into a JSON bundle.
#[derive(Parser)]
#[command(name = "docbundle", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the docs tree and write the bundle.
    Build(BuildArgs),
    /// Print the ordered outline of the docs tree.
    Outline(OutlineArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
