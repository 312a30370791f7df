// src/logging.rs

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs to stdout and to a daily rolling file under `logs/`.
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init_with_stdout(rust_log: &str, file_name: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

/// File-only logging, for the interactive terminal where stdout is the UI.
pub fn init_file_only(rust_log: &str, file_name: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::new(rust_log))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}
