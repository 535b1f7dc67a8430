//! Global tracing subscriber setup.

use std::path::Path;

use anyhow::{Context, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};
use crate::paths::resolve_in_home;

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `cfg.level`. Console output is text or JSON per `cfg.format`; when
/// `cfg.file` is set, a plain-text copy goes to a daily-rolling file
/// resolved against `home_dir`.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
///
/// # Errors
/// Returns an error if the level directive is invalid, the log directory
/// cannot be created, or a global subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig, home_dir: &Path) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.level)
            .with_context(|| format!("invalid log level directive '{}'", cfg.level))?,
    };

    let (file_layer, guard) = match cfg.file.as_deref() {
        Some(file) => {
            let (writer, guard) = file_writer(&resolve_in_home(home_dir, file))?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let text_layer = (cfg.format == LogFormat::Text).then(|| fmt::layer().with_target(true));
    let json_layer = (cfg.format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install global tracing subscriber")?;

    Ok(guard)
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("log file path has no parent: {}", path.display()))?;
    let prefix = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix.to_string_lossy())
        .build(dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))?;

    Ok(tracing_appender::non_blocking(appender))
}
