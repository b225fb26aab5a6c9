//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `TENSORBOX_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "tensorbox_core=info,tensorbox_analysis=info,tensorbox_pipeline=info";

/// Initialize the tensorbox tracing/logging system.
///
/// Reads the `TENSORBOX_LOG` environment variable for per-crate log levels.
/// Format: `TENSORBOX_LOG=tensorbox_pipeline=debug,tensorbox_analysis=warn`
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TENSORBOX_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
