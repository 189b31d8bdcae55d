//! granulize command-line entry point

use clap::Parser;
use granulize_cli::commands::Commands;

/// Granulize markup fragments into individually addressable grains
#[derive(Debug, Parser)]
#[command(name = "granulize", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
