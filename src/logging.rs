//! Tracing setup for the `jt905-frame` binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary.

/// Initialize tracing output on stderr
///
/// Call early in main() before any logging occurs.
/// `verbose` forces debug-level output, otherwise `level` is used as the
/// filter directive (e.g. "warn", "jt905_writer=trace").
pub fn init_tracing(verbose: bool, level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_new(level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(filter)
        .try_init();
}
