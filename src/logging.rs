//! Tracing setup.
//!
//! The terminal is owned by the UI, so logs go to a file through a
//! non-blocking writer.  `RUST_LOG` overrides the default `info` filter.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns the writer guard, which must be kept alive until exit so buffered
/// lines are flushed.  If the log file cannot be opened, logs go to stderr
/// instead and `None` is returned.
pub fn init(path: &Path) -> Option<WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path);

    match file {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            tracing::info!(path = %path.display(), "logging initialized");
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!(path = %path.display(), error = %e, "failed to open log file; using stderr");
            None
        }
    }
}
