//! Sets up the global `tracing` subscriber for the command line tool.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a subscriber that writes log events to stderr.
///
/// `verbosity` counts the `-v` flags: none shows warnings and errors, one
/// adds info, two adds debug and three or more adds trace. A `RUST_LOG`
/// environment variable takes precedence over `verbosity`.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn setup_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}

fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
