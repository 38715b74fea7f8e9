//! Error types for the non-I/O parts of the crate.
//!
//! The byte-sink path (`RotatingFileWriter`, `ByteSink`) speaks `std::io::Error`
//! so it composes with `std::io::Write`. Everything else returns [`Error`].

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to walk log directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Home directory not found")]
    NoHomeDir,

    #[error("Global logger is already initialized")]
    AlreadyInitialized,
}
