//! Tracing subscriber setup shared by the trainer and the server.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directives used when `RUST_LOG` is unset. `tower-http` request traces are
/// emitted at `debug` and stay hidden unless asked for.
const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber. Calling it twice is a no-op, which keeps
/// integration tests that share a process from panicking.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))?;

    let layer = fmt::layer()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).try_init()?;
    tracing::debug!(directives = DEFAULT_DIRECTIVES, "tracing ready");
    Ok(())
}
