//! snapmatch CLI
//!
//! Matches JSON or text documents against snapshot files from the shell.
//! Exit status: 0 on match, 1 on mismatch, 2 on error.

use clap::{Parser, Subcommand};
use snapmatch_core::logging_facility::{init, Profile};
use std::process::ExitCode;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "snapmatch")]
#[command(about = "Snapshot matching for JSON and text documents", long_about = None)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Match a document against its snapshot
    Match(commands::matching::MatchArgs),
    /// Print the snapshot and mismatch file paths for a name
    Paths(commands::paths::PathsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Match(args) => commands::matching::execute(args),
        Commands::Paths(args) => commands::paths::execute(args).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
