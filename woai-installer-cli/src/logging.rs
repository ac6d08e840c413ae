//! Logging setup.
//!
//! Everything at or above the configured level goes to a daily log file.
//! With `--verbose` the same events are mirrored to stderr at debug level.
//! `RUST_LOG` overrides both.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use woai_installer::config::LoggingSettings;

use crate::error::CliError;

const LOG_FILE_PREFIX: &str = "woai-installer.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits.
pub fn init(settings: &LoggingSettings, verbose: bool) -> Result<WorkerGuard, CliError> {
    fs::create_dir_all(&settings.directory).map_err(|e| {
        CliError::Logging(format!(
            "cannot create log directory {}: {}",
            settings.directory.display(),
            e
        ))
    })?;

    let level = if verbose { "debug" } else { settings.level.as_str() };
    // The binary and the library share the `woai_installer` target prefix.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("woai_installer={}", level)));

    let appender = tracing_appender::rolling::daily(&settings.directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(LocalTime::rfc_3339());

    let console_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    Ok(guard)
}
