use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with environment-based filtering.
///
/// Diagnostics go to stderr so the rendered table/CSV on stdout stays
/// machine-readable. The filter defaults to "warn"; set RUST_LOG to see
/// per-line drop events at debug level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
