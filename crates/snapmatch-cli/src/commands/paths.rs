//! Paths command
//!
//! Usage: snapmatch paths --name <NAME> [--dir <DIR>] [--group <KEY>]

use super::SnapshotLocation;
use clap::Args;

#[derive(Debug, Args)]
pub struct PathsArgs {
    #[command(flatten)]
    pub location: SnapshotLocation,
}

pub fn execute(args: PathsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.location.builder().build()?;
    println!("snapshot: {}", settings.snapshot_file_path().display());
    println!("mismatch: {}", settings.mismatch_file_path().display());
    Ok(())
}
