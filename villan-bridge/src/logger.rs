//! Logging Infrastructure
//!
//! Structured logging setup. One short-lived process per cycle, so
//! output goes to stderr and rotation is left to the invoking timer.

/// Initialize the logger
pub fn init_logger(log_level: &str) {
    tracing_subscriber::fmt()
        .with_max_level(log_level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
