//! Tracing setup.
//!
//! Verbosity comes from `RUST_LOG` (default `warn`). The full-screen UI
//! owns the terminal, so it only logs when given a log directory, where
//! files rotate daily. Plain mode without a directory logs to stderr.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "lined.log";

/// Install the global subscriber.
///
/// The returned guard flushes buffered file output when dropped and must
/// outlive every log call.
pub fn init(log_dir: Option<&Path>, to_stderr: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_filter(filter),
                )
                .init();
            Some(guard)
        }
        None if to_stderr => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_filter(filter),
                )
                .init();
            None
        }
        None => None,
    }
}
