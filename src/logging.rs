//! Structured logging bootstrap using `tracing`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global stderr subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Stdout is left to reports and JSON output. Calling this twice is a no-op.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_level(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(env_filter);

    // A concurrent initialiser may win the race; that subscriber is equally valid.
    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        return Ok(());
    }

    tracing::debug!(level = ?Level::INFO, "tracing initialised");
    Ok(())
}
