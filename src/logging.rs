//! Logging setup for the binaries.
//!
//! Logs go to stderr so report output on stdout stays machine-readable.
//! Set `DEBUG_LOGGING=1` for debug output from this crate; `RUST_LOG`
//! overrides both.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,leviathan=debug"
    } else {
        "warn,leviathan=info"
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(debug_logging)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init()
        .is_ok()
    {
        tracing::debug!(debug_logging, "Logging initialized");
    }
}
