//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so stdout carries only the tools' own messages.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global subscriber. `debug` lowers the threshold from WARN to DEBUG.
pub fn init(debug: bool) {
    let log_level = if debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
