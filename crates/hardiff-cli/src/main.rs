//! hardiff CLI
//!
//! Command-line interface for aligning and comparing HAR captures

use clap::{Parser, Subcommand};
use hardiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "hardiff")]
#[command(about = "hardiff - Align and compare HTTP traffic captures", long_about = None)]
struct Cli {
    /// Human-readable debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON structured logs on stderr
    #[arg(long, global = true, conflicts_with = "verbose")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Align the records of two captures
    Align(commands::align::AlignArgs),
    /// Compare one record of each capture section by section
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init(Profile::Development);
    } else if cli.log_json {
        init(Profile::Production);
    }

    let result = match cli.command {
        Commands::Align(args) => commands::align::execute(args),
        Commands::Compare(args) => commands::compare::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
