//! Leveled logging with hourly file rotation.
//!
//! Lines go to stdout and to `<dir>/<YYYYMM>/<YYYYMMDD_HH>.txt`, a new file each
//! UTC hour. The pieces compose bottom-up:
//!
//! - [`RotatingFileWriter`]: append-only sink that opens the next hour's file
//!   on demand. Safe to share across threads.
//! - [`FanOut`] / [`Console`]: byte sinks for sending one write to several
//!   destinations.
//! - [`LeveledLogger`]: threshold check, line formatting, one sink write per
//!   line. Sink failures are swallowed.
//! - [`global`]: the process-wide instance behind [`info`], [`info!`] and
//!   friends.
//!
//! ```no_run
//! use hourlog::{Level, LogConfig};
//!
//! hourlog::init(&LogConfig::default()).expect("logger installed once");
//! hourlog::set_level(Level::Debug);
//! hourlog::info("service started");
//! hourlog::warn!("queue depth {} over limit", 512);
//! ```

pub mod clock;
pub mod config;
mod error;
pub mod files;
pub mod global;
mod level;
mod location;
mod logger;
mod macros;
pub mod sink;
mod writer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LogConfig;
pub use error::{Error, Result};
pub use global::{
    debug, error, info, init, level, logger, set_level, try_init, warn, writer, Logging,
};
pub use level::{Level, ParseLevelError};
pub use location::CallSite;
pub use logger::LeveledLogger;
pub use sink::{ByteSink, Console, FanOut};
pub use writer::RotatingFileWriter;
