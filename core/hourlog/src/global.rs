//! The process-wide logger.
//!
//! A [`Logging`] bundles the three pieces in construction order: the
//! [`RotatingFileWriter`], the [`FanOut`] sink over console and writer, and the
//! [`LeveledLogger`] on top. Install one with [`try_init`] early in `main`; if
//! nothing was installed, the first use builds one from [`LogConfig::load`].
//!
//! Code that needs isolation (tests, embedded use) should build its own
//! `Logging` or `LeveledLogger` instead of going through the global.

use once_cell::sync::OnceCell;
use std::fmt::Display;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::LogConfig;
use crate::error::{Error, Result};
use crate::level::Level;
use crate::logger::LeveledLogger;
use crate::sink::{ByteSink, Console, FanOut};
use crate::writer::RotatingFileWriter;

static GLOBAL: OnceCell<Logging> = OnceCell::new();

/// A writer, its fan-out sink and the logger over them.
#[derive(Debug)]
pub struct Logging {
    writer: Arc<RotatingFileWriter>,
    sink: Arc<FanOut>,
    logger: LeveledLogger,
}

impl Logging {
    pub fn from_config(config: &LogConfig) -> Self {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Builds writer → fan-out → logger, all reading time from `clock`.
    pub fn from_config_with_clock(config: &LogConfig, clock: Arc<dyn Clock>) -> Self {
        let writer = Arc::new(RotatingFileWriter::with_clock(&config.dir, clock.clone()));

        let mut fan_out = FanOut::new();
        if config.console {
            fan_out.push(Arc::new(Console::stdout()));
        }
        fan_out.push(writer.clone());
        let sink = Arc::new(fan_out);

        let logger = LeveledLogger::with_clock(config.level, sink.clone(), clock);

        Logging {
            writer,
            sink,
            logger,
        }
    }

    pub fn writer(&self) -> &Arc<RotatingFileWriter> {
        &self.writer
    }

    /// The console + file sink, for composing with other output.
    pub fn sink(&self) -> Arc<dyn ByteSink> {
        self.sink.clone()
    }

    pub fn logger(&self) -> &LeveledLogger {
        &self.logger
    }
}

/// Installs `logging` as the process-wide instance.
///
/// Fails with [`Error::AlreadyInitialized`] if one is already in place,
/// including one built implicitly by an earlier log call.
pub fn try_init(logging: Logging) -> Result<&'static Logging> {
    let mut fresh = false;
    let current = GLOBAL.get_or_init(|| {
        fresh = true;
        logging
    });
    if !fresh {
        return Err(Error::AlreadyInitialized);
    }
    Ok(current)
}

/// Installs a `Logging` built from `config`.
pub fn init(config: &LogConfig) -> Result<&'static Logging> {
    try_init(Logging::from_config(config))
}

/// The process-wide instance, built from [`LogConfig::load`] on first use.
pub fn global() -> &'static Logging {
    GLOBAL.get_or_init(|| Logging::from_config(&LogConfig::load()))
}

pub fn logger() -> &'static LeveledLogger {
    global().logger()
}

/// The process-wide rotating writer, for composing with other sinks.
pub fn writer() -> Arc<RotatingFileWriter> {
    global().writer().clone()
}

pub fn set_level(level: Level) {
    logger().set_threshold(level);
}

pub fn level() -> Level {
    logger().threshold()
}

#[track_caller]
pub fn debug(message: impl Display) {
    logger().log(Level::Debug, message);
}

#[track_caller]
pub fn info(message: impl Display) {
    logger().log(Level::Info, message);
}

#[track_caller]
pub fn warn(message: impl Display) {
    logger().log(Level::Warn, message);
}

#[track_caller]
pub fn error(message: impl Display) {
    logger().log(Level::Error, message);
}
