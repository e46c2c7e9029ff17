//! Tracing initialization.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the charprobe tracing/logging system.
///
/// Reads `CHARPROBE_LOG` for per-module log levels, e.g.
/// `CHARPROBE_LOG=charprobe_resources=debug,charprobe_detect=trace`.
/// Falls back to `charprobe=info` if unset or invalid.
///
/// Idempotent. If another global subscriber is already set it stays in
/// place, and the conflict is reported to it at debug level.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();

        // Embedding applications may own the global subscriber; keep theirs.
        if let Err(err) = installed {
            debug!(error = %err, "global subscriber already set, keeping it");
        }
    });
}
