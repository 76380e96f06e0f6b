//! Tracing setup for the `cmblocks` binary

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "CMBLOCKS_LOG";

/// Install the global subscriber.
///
/// Reads per-target levels from `CMBLOCKS_LOG`, e.g.
/// `CMBLOCKS_LOG=cmblocks=debug,cmblocks::compliance=warn`. Falls back to
/// `cmblocks=info` when unset or invalid. Output goes to stderr so that
/// stdout stays clean for bundle text and JSON. Safe to call repeatedly.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("cmblocks=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
