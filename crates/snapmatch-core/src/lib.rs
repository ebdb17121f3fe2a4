//! Snapshot matching core
//!
//! Value model, path selection, settings, and the middleware pipeline that
//! compares an actual result with a stored snapshot. File storage stages
//! live in `snapmatch-store`; the public matching entry points live in
//! `snapmatch-engine`.

pub mod advisory;
pub mod comparator;
pub mod context;
pub mod errors;
pub mod logging_facility;
pub mod messages;
pub mod path;
pub mod pipeline;
pub mod settings;
pub mod value;

pub use snapmatch_core_types as core_types;

pub use advisory::{Advisories, Tip};
pub use comparator::{DefaultComparator, SnapshotComparator};
pub use context::{Expected, Payload, SnapshotContext};
pub use errors::{ExError, ExErrorKind, Result, SnapError};
pub use messages::{CollectingSink, MessageSink, TracingSink};
pub use path::JsonPath;
pub use pipeline::{Next, Pipeline, SnapshotStage};
pub use settings::{EnvToggles, Settings, SettingsBuilder};
pub use value::{GroupDocument, SnapshotValue};
