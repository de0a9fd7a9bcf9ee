//! Diagnostic logging.
//!
//! User-facing output goes through the `info!`/`success!`/`warning!`/`error!`
//! macros; this module only wires `tracing` to stderr for request-level
//! diagnostics, filtered by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::Res;

const DEFAULT_FILTER: &str = "trackctl=warn";

/// Installs the global subscriber. Defaults to `trackctl=warn` when
/// `RUST_LOG` is unset or invalid.
pub fn init_logging() -> Res<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()?;

    Ok(())
}
