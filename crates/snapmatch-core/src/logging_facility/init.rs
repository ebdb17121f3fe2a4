//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output on stderr
    Development,
    /// JSON structured output
    Production,
    /// No output; tests install `init_test_capture()` instead
    Test,
}

impl Profile {
    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "snapmatch=debug",
            Profile::Production | Profile::Test => "snapmatch=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call has an effect. `RUST_LOG` overrides the profile's
/// default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        // A subscriber installed elsewhere wins; ignore the error.
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}
