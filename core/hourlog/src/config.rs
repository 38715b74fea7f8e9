//! Configuration loading and saving.
//!
//! The config file lives at `~/.hourlog/config.json`:
//!
//! ```json
//! { "dir": "logs", "level": "info", "console": true }
//! ```
//!
//! Reads are best-effort: a missing or malformed file yields defaults so the
//! host program always gets a working logger.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::level::Level;

const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Base directory for the hourly files. Relative paths resolve against the
    /// working directory of the process.
    pub dir: PathBuf,
    /// Minimum level emitted.
    pub level: Level,
    /// Also echo every line to stdout.
    pub console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            dir: PathBuf::from(DEFAULT_LOG_DIR),
            level: Level::Info,
            console: true,
        }
    }
}

/// Returns the path to the hourlog data directory (~/.hourlog).
pub fn get_hourlog_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hourlog"))
}

/// Returns the path to the configuration file (~/.hourlog/config.json).
pub fn get_config_path() -> Option<PathBuf> {
    get_hourlog_dir().map(|d| d.join("config.json"))
}

impl LogConfig {
    /// Loads the configuration, returning defaults if the file doesn't exist.
    pub fn load() -> LogConfig {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => LogConfig::default(),
        }
    }

    /// Loads the configuration from a specific file.
    pub fn load_from(path: &Path) -> LogConfig {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return LogConfig::default(),
        };

        if content.trim().is_empty() {
            return LogConfig::default();
        }

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse log config, using defaults"
                );
                LogConfig::default()
            }
        }
    }

    /// Saves the configuration to `~/.hourlog/config.json`.
    pub fn save(&self) -> Result<()> {
        let path = get_config_path().ok_or(Error::NoHomeDir)?;
        self.save_to(&path)
    }

    /// Saves the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.dir, PathBuf::from("logs"));
        assert_eq!(config.level, Level::Info);
        assert!(config.console);
    }

    #[test]
    fn test_missing_file_returns_defaults() {
        let temp = tempdir().unwrap();
        let config = LogConfig::load_from(&temp.path().join("nope.json"));
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_empty_file_returns_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(LogConfig::load_from(&path), LogConfig::default());
    }

    #[test]
    fn test_corrupt_file_returns_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(LogConfig::load_from(&path), LogConfig::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, r#"{"level": "warn"}"#).unwrap();

        let config = LogConfig::load_from(&path);
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.dir, PathBuf::from("logs"));
        assert!(config.console);
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.json");
        let config = LogConfig {
            dir: temp.path().join("out"),
            level: Level::Debug,
            console: false,
        };

        config.save_to(&path).unwrap();
        assert_eq!(LogConfig::load_from(&path), config);
    }
}
