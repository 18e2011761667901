//! Logging bootstrap for the Trellis core layer, built on the `tracing`
//! ecosystem. Supports console output and an optional daily-rolling log
//! file with text or JSON formatting.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for tests, early startup before configuration is loaded, or as
/// a fallback when full initialization fails. Filters via `RUST_LOG`,
/// defaulting to "info". Errors (e.g. a logger already being set) are
/// ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Creates the file logging layer: daily rolling appender under the log
/// path's parent directory, text or JSON format.
fn create_file_layer(
    log_path: &Path,
    format: &str,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync + 'static>, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            utils::fs::ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("trellis.log")),
    );

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: Box<dyn Layer<Registry> + Send + Sync + 'static> =
        if format.eq_ignore_ascii_case("json") {
            Box::new(fmt::layer().json().with_writer(non_blocking_writer).with_ansi(false))
        } else {
            Box::new(fmt::layer().with_writer(non_blocking_writer).with_ansi(false))
        };
    Ok((layer, guard))
}

/// Keeps the file logger's worker guard alive for the process lifetime so
/// buffered log lines are flushed.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes the global logging system from a [`LoggingConfig`].
///
/// Installs a console layer and, when `file_path` is set, a daily-rolling
/// file layer. With `is_reload` set, an already-installed subscriber is
/// tolerated instead of reported as an error.
///
/// # Errors
///
/// Returns [`CoreError::Logging`] when the configured level is invalid or
/// when setting the global subscriber fails on initial setup.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        invalid => {
            return Err(CoreError::Logging(LoggingError::InitializationFailure(
                format!("Invalid log level in config: {}", invalid),
            )));
        }
    };
    let level_str = level.to_string();

    let stdout_layer: Box<dyn Layer<Registry> + Send + Sync + 'static> =
        if config.format.eq_ignore_ascii_case("json") {
            fmt::layer()
                .json()
                .with_writer(stdout)
                .with_ansi(false)
                .with_filter(EnvFilter::new(level_str.clone()))
                .boxed()
        } else {
            fmt::layer()
                .with_writer(stdout)
                .with_ansi(atty::is(atty::Stream::Stdout))
                .with_filter(EnvFilter::new(level_str.clone()))
                .boxed()
        };

    let mut new_file_guard: Option<WorkerGuard> = None;
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = vec![stdout_layer];
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &config.format)?;
        new_file_guard = Some(guard);
        layers.push(file_layer.with_filter(EnvFilter::new(level_str)).boxed());
    }

    let result = Registry::default().with(layers).try_init();

    // Swap in the new worker guard; dropping the old one flushes its logs.
    match LOG_WORKER_GUARD.lock() {
        Ok(mut guard_slot) => {
            *guard_slot = new_file_guard;
        }
        Err(e) => {
            eprintln!(
                "[ERROR] Failed to lock LOG_WORKER_GUARD: {}. Log flushing may be affected.",
                e
            );
        }
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) if is_reload => {
            tracing::info!("Logging re-initialization attempted; previous subscriber persists: {}", e);
            Ok(())
        }
        Err(e) => Err(CoreError::Logging(LoggingError::InitializationFailure(
            format!("Failed to set global tracing subscriber. Was it already initialized? Error: {}", e),
        ))),
    }
}
