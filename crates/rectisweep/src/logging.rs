use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "rectisweep.log";

/// Log file size that triggers rotation on startup (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// Move an oversized log aside to `rectisweep.log.old`, replacing any
/// previous one.
fn rotate_log_if_needed(log_path: &Path) -> std::io::Result<()> {
    match fs::metadata(log_path) {
        Ok(metadata) if metadata.len() > MAX_LOG_SIZE => {
            fs::rename(log_path, log_path.with_extension("log.old"))
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Default filter when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("rectisweep={level},rectisweep_core={level}")
}

/// Initialize logging to write to a file in the data directory.
///
/// Logs are written to `{data_dir}/rectisweep.log` through a non-blocking
/// appender; keep the returned guard alive until exit so buffered lines are
/// flushed. The log level can be controlled via the `level` parameter or the
/// `RUST_LOG` environment variable.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<WorkerGuard> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE);
    if let Err(e) = rotate_log_if_needed(&log_path) {
        eprintln!("Warning: Failed to rotate log file: {e}");
    }

    let appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(
        "rectisweep logging initialized (log_path={})",
        log_path.display()
    );
    Ok(guard)
}
