//! Snapshot matching engine
//!
//! Public entry points: [`match_to`] compares any serializable result with
//! its stored snapshot, [`assert_matches`] and [`assert_snapshot!`] wrap it
//! for tests.
//!
//! ```no_run
//! use snapmatch_engine::{match_to, SettingsBuilder};
//!
//! let settings = SettingsBuilder::from_env()
//!     .snapshot_name("Totals")
//!     .snapshot_directory("tests/_snapshots")
//!     .build()?;
//! let matched = match_to(&vec![1, 2, 3], &settings)?;
//! # Ok::<(), snapmatch_engine::SnapError>(())
//! ```

pub mod assert;
pub mod consumer;
pub mod matcher;
pub mod provider;

pub use assert::assert_matches;
pub use consumer::{ConsumerComparator, MatchReport, RecordingConsumer, ResultConsumer};
pub use matcher::{default_pipeline, filter_value, match_to, match_value, Snapshot};
pub use provider::{settings_for, TestContextProvider, ThreadNameContext};

pub use snapmatch_core::{
    CollectingSink, EnvToggles, Expected, MessageSink, Payload, Pipeline, Result, Settings,
    SettingsBuilder, SnapError, SnapshotContext, SnapshotStage, SnapshotValue,
};
pub use snapmatch_core_types::env::DEFAULT_SNAPSHOT_SUBDIRECTORY;
pub use snapmatch_core_types::SnapshotIdentity;
