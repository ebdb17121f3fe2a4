pub mod matching;
pub mod paths;

use clap::Args;
use snapmatch_engine::SettingsBuilder;
use std::path::PathBuf;

/// Options that locate a snapshot
#[derive(Debug, Args)]
pub struct SnapshotLocation {
    /// Snapshot name (file name without extension)
    #[arg(short, long)]
    pub name: String,

    /// Directory holding snapshot files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Store the result as one member of a group file
    #[arg(short, long)]
    pub group: Option<String>,

    /// Snapshot file extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Mismatch file extension
    #[arg(long)]
    pub mismatch_extension: Option<String>,
}

impl SnapshotLocation {
    /// Builder with the location applied; behavior flags come from the environment
    pub fn builder(&self) -> SettingsBuilder {
        let mut builder = SettingsBuilder::from_env()
            .snapshot_name(&self.name)
            .snapshot_directory(&self.dir);
        if let Some(group) = &self.group {
            builder = builder.group_key(group);
        }
        if let Some(extension) = &self.extension {
            builder = builder.snapshot_extension(extension);
        }
        if let Some(extension) = &self.mismatch_extension {
            builder = builder.mismatch_extension(extension);
        }
        builder
    }
}
