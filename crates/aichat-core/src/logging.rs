//! File logging setup.
//!
//! Logs go to ${AICHAT_HOME}/logs/ rather than the terminal so they never
//! interleave with chat output. The returned guard must be held for the
//! lifetime of the process to flush the non-blocking writer.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::paths::logs_dir;

/// Initializes the global tracing subscriber with a daily rolling file.
///
/// Filtering defaults to `aichat=info` and is overridable via `RUST_LOG`.
/// Returns `None` when the logs directory cannot be created; the client
/// runs fine without file logging.
pub fn init() -> Option<WorkerGuard> {
    let dir = logs_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: failed to create log directory: {e}");
        return None;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aichat=info,aichat_core=info"));

    let file_appender = tracing_appender::rolling::daily(dir, "aichat.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Some(guard)
}
