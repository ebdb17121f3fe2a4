//! Advisory tips shown at most once per process
//!
//! Tips are purely informational. Each has its own flag, set the first time
//! the tip is shown and cleared only by process restart or `reset()`.

use crate::messages::MessageSink;
use snapmatch_core_types::env::ENV_CREATE_MISSING_SNAPSHOTS;
use std::sync::atomic::{AtomicBool, Ordering};

/// Advisory messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tip {
    /// A snapshot was missing and create-missing was off
    CreateMissing,
    /// A snapshot file was created or refreshed
    ReviewNewSnapshot,
    /// A mismatch file was written
    ReviewMismatch,
}

impl Tip {
    pub fn text(&self) -> String {
        match self {
            Tip::CreateMissing => format!(
                "===> Tip: Tests can be run with the following environment variable set to automatically create missing snapshot files based on actual results: {}=yes",
                ENV_CREATE_MISSING_SNAPSHOTS
            ),
            Tip::ReviewNewSnapshot => "===> Tip: Review the content of created and refreshed snapshot files to ensure they reflect expected output.".to_string(),
            Tip::ReviewMismatch => "===> Tip: Review the content of mismatched output files and use them to update snapshot files as appropriate.".to_string(),
        }
    }
}

/// "Already shown" flags, one per tip
#[derive(Debug)]
pub struct Advisories {
    create_missing: AtomicBool,
    review_new_snapshot: AtomicBool,
    review_mismatch: AtomicBool,
}

static GLOBAL_ADVISORIES: Advisories = Advisories::new();

impl Advisories {
    pub const fn new() -> Self {
        Self {
            create_missing: AtomicBool::new(false),
            review_new_snapshot: AtomicBool::new(false),
            review_mismatch: AtomicBool::new(false),
        }
    }

    /// Process-wide instance used by default
    pub fn global() -> &'static Advisories {
        &GLOBAL_ADVISORIES
    }

    fn flag(&self, tip: Tip) -> &AtomicBool {
        match tip {
            Tip::CreateMissing => &self.create_missing,
            Tip::ReviewNewSnapshot => &self.review_new_snapshot,
            Tip::ReviewMismatch => &self.review_mismatch,
        }
    }

    /// Write the tip unless it was already shown. Returns `true` if written.
    pub fn show_once(&self, tip: Tip, sink: &dyn MessageSink) -> bool {
        if self.flag(tip).swap(true, Ordering::SeqCst) {
            return false;
        }
        sink.write(&tip.text());
        true
    }

    pub fn was_shown(&self, tip: Tip) -> bool {
        self.flag(tip).load(Ordering::SeqCst)
    }

    /// Forget every shown tip
    pub fn reset(&self) {
        for tip in [Tip::CreateMissing, Tip::ReviewNewSnapshot, Tip::ReviewMismatch] {
            self.flag(tip).store(false, Ordering::SeqCst);
        }
    }
}

impl Default for Advisories {
    fn default() -> Self {
        Self::new()
    }
}
