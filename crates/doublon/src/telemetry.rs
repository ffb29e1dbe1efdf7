//! Log output setup.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for the long-running HTTP service.
pub const SERVE_FILTER: &str = "info,tower_http=info";

/// Default filter for one-shot commands, which keep stdout for their own output.
pub const COMMAND_FILTER: &str = "warn";

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `default_filter` when set.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
