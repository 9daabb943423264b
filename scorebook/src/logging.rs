//! Diagnostic tracing for the scorebook CLI.
//!
//! Tracing goes to stderr and never mixes with command output on stdout.
//! The pure `core` layer does not log; only the shell and orchestration do.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (from
/// `[logging] filter` in `scorebook.toml`) is used. Output: stderr, compact.
///
/// # Example
/// ```bash
/// RUST_LOG=scorebook=debug scorebook record at_bat.json
/// ```
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
