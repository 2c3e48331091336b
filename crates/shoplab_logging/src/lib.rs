//! Shared logging setup for shoplab binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "shoplab=info,shoplab_db=info";
const QUIET_CONSOLE_FILTER: &str = "warn";

/// Logging configuration.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Directory for the daily rolling log file; `None` logs to the console only.
    pub log_dir: Option<PathBuf>,
}

/// Initialize tracing with a daily rolling file writer and stderr output.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process. A log directory that cannot be created downgrades to
/// console-only logging.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let mut log_guard = None;
    let file_layer = match config.log_dir.as_deref() {
        Some(dir) => match file_writer(dir, config.app_name) {
            Ok((writer, guard)) => {
                log_guard = Some(guard);
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_filter(env_filter(DEFAULT_LOG_FILTER)),
                )
            }
            Err(err) => {
                eprintln!("Warning: file logging disabled: {:#}", err);
                None
            }
        },
        None => None,
    };

    let console_filter = if config.verbose {
        env_filter(DEFAULT_LOG_FILTER)
    } else {
        EnvFilter::new(QUIET_CONSOLE_FILTER)
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_guard)
}

/// File name of the daily log for `app_name`, before the date suffix.
pub fn log_file_name(app_name: &str) -> String {
    format!("{}.log", sanitize_name(app_name))
}

/// `RUST_LOG` if set and valid, otherwise `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn file_writer(dir: &Path, app_name: &str) -> Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, log_file_name(app_name));
    Ok(tracing_appender::non_blocking(appender))
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_name_is_sanitized() {
        assert_eq!(log_file_name("shoplab"), "shoplab.log");
        assert_eq!(log_file_name("shop lab/../x"), "shop_lab____x.log");
    }

    #[test]
    fn test_file_writer_creates_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data").join("logs");

        let (_writer, _guard) = file_writer(&dir, "shoplab").unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_file_writer_fails_when_dir_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("logs");
        fs::write(&blocker, b"not a dir").unwrap();

        assert!(file_writer(&blocker, "shoplab").is_err());
    }
}
