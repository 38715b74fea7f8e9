//! Diagnostics for the hourlog binary itself, via tracing.
//!
//! Logs to `~/.hourlog/diagnostics/<YYYYMM>/<YYYYMMDD_HH>.txt` through the same
//! hourly writer the tool manages, wrapped in a non-blocking appender. Log
//! level can be controlled via `RUST_LOG` (default `hourlog=info`).
//!
//! Falls back to stderr logging if the diagnostics directory cannot be opened.

use hourlog::RotatingFileWriter;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "hourlog=info";

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered diagnostics are flushed.
pub fn init() -> Option<WorkerGuard> {
    let diagnostics_dir = hourlog::config::get_hourlog_dir()
        .map(|h| h.join("diagnostics"))
        .unwrap_or_else(|| PathBuf::from(".hourlog-diagnostics"));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match create_diagnostics_writer(&diagnostics_dir) {
        Ok(writer) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(writer);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_timer(fmt::time::UtcTime::rfc_3339())
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        Err(_) => {
            // Fall back to stderr logging if the diagnostics directory is unusable
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_timer(fmt::time::UtcTime::rfc_3339())
                        .with_ansi(true),
                )
                .init();
            None
        }
    }
}

fn create_diagnostics_writer(dir: &Path) -> std::io::Result<RotatingFileWriter> {
    let writer = RotatingFileWriter::new(dir);
    writer.open_current()?;
    Ok(writer)
}
