//! Tracing setup for `nvault`.
//!
//! Human-readable events go to stderr so stdout stays free for command
//! output and the MCP stdio transport. A second, more verbose sink can be
//! pointed at a file through `[logging] file`.

use notevault_core::config::types::{LoggingConfig, ResolvedConfig};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, fmt};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

static FILE_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Install the global subscriber described by `cfg.logging`.
///
/// Fails only when the log file cannot be opened.
pub fn init(cfg: &ResolvedConfig) -> io::Result<()> {
    let logging = &cfg.logging;

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter_for(&logging.level, LevelFilter::INFO));

    let file_layer = match logging.file {
        Some(ref path) => Some(file_layer(path, logging)?),
        None => None,
    };

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
    Ok(())
}

/// Drop the file writer's guard, flushing buffered lines. Statics are never
/// dropped, so this has to run before the process exits.
pub fn flush() {
    if let Ok(mut guard) = FILE_GUARD.lock() {
        guard.take();
    }
}

fn file_layer<S>(path: &Path, logging: &LoggingConfig) -> io::Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let level = logging.file_level.as_deref().unwrap_or(&logging.level);
    let file = open_append(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    if let Ok(mut slot) = FILE_GUARD.lock() {
        *slot = Some(guard);
    }

    Ok(fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter_for(level, LevelFilter::DEBUG))
        .boxed())
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}

/// `RUST_LOG` wins; otherwise the configured level, or `fallback` when the
/// configured name is not recognised.
fn filter_for(level: &str, fallback: LevelFilter) -> EnvFilter {
    let default = parse_level(level).unwrap_or(fallback);
    EnvFilter::builder().with_default_directive(default.into()).from_env_lossy()
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
