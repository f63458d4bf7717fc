use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{AppConfig, DEFAULT_LOG_LEVEL};

/// Installs the global subscriber: stdout always, plus a daily rolling file
/// under `logs/` when `LOG_FILE` is set. Keep the returned guard alive for as
/// long as file output should be flushed.
pub fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    match &config.log_file {
        Some(file) => {
            let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily("logs", file));
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true);
            registry.with(file_layer).init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}
