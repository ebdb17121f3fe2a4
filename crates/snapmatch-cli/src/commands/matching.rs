//! Match command
//!
//! Usage: snapmatch match --name <NAME> [--dir <DIR>] [--group <KEY>]
//!        [--include <PATH>]... [--exclude <PATH>]... [--refresh]
//!        [--create-missing] [--compact] [--text] [INPUT]

use super::SnapshotLocation;
use clap::Args;
use snapmatch_core::messages::MessageSink;
use snapmatch_engine::{match_value, SnapshotValue};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub location: SnapshotLocation,

    /// Path to select from the document (repeatable)
    #[arg(short, long)]
    pub include: Vec<String>,

    /// Path to remove from the document (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Overwrite the snapshot with the document
    #[arg(long)]
    pub refresh: bool,

    /// Create the snapshot if it does not exist
    #[arg(long)]
    pub create_missing: bool,

    /// Write snapshots without indentation
    #[arg(long)]
    pub compact: bool,

    /// Treat the input as plain text instead of JSON
    #[arg(long)]
    pub text: bool,

    /// Input file, `-` or omitted for stdin
    pub input: Option<PathBuf>,
}

/// Prints engine messages on stderr
struct StderrSink;

impl MessageSink for StderrSink {
    fn write(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn read_input(input: Option<&PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Returns whether the document matched
pub fn execute(args: MatchArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let mut builder = args
        .location
        .builder()
        .indent_output(!args.compact)
        .message_sink(Arc::new(StderrSink));
    // Flags only switch behavior on; the environment may already have
    if args.refresh {
        builder = builder.force_refresh(true);
    }
    if args.create_missing {
        builder = builder.create_missing(true);
    }
    for path in args.include {
        builder = builder.include(path);
    }
    for path in args.exclude {
        builder = builder.exclude(path);
    }
    let settings = builder.build()?;

    let input = read_input(args.input.as_ref())?;
    let actual = if args.text {
        SnapshotValue::String(input.strip_suffix('\n').unwrap_or(&input).to_string())
    } else {
        SnapshotValue::parse(&input)?
    };

    let matched = match_value(actual, &settings)?;
    if matched {
        println!("match: {}", settings.snapshot_name());
    } else {
        println!(
            "mismatch: {} (actual written to {})",
            settings.snapshot_name(),
            settings.mismatch_file_path().display()
        );
    }
    Ok(matched)
}
