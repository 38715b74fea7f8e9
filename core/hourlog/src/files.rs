//! Enumerates the hourly files under a base directory.
//!
//! Only files that match the writer's layout (`YYYYMM/YYYYMMDD_HH.txt`, month
//! directory agreeing with the file's date) are returned. Anything else in the
//! tree is ignored. Nothing here deletes files.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

static HOUR_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})_(\d{2})\.txt$").expect("hour file pattern is valid")
});

/// One rotated log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    /// Start of the hour the file covers.
    pub hour: DateTime<Utc>,
    pub len: u64,
}

/// Lists hourly files under `base_dir`, oldest first.
///
/// A missing base directory is not an error; it simply holds no files.
pub fn list(base_dir: &Path) -> Result<Vec<LogFile>> {
    if !base_dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(base_dir).min_depth(2).max_depth(2) {
        let entry = entry.map_err(|source| Error::Walk {
            path: base_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(hour) = parse_hour(entry.path()) else {
            continue;
        };
        let len = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(LogFile {
            path: entry.into_path(),
            hour,
            len,
        });
    }

    files.sort_by(|a, b| a.hour.cmp(&b.hour));
    Ok(files)
}

/// Parses the hour a file covers from its `YYYYMM/YYYYMMDD_HH.txt` path.
pub fn parse_hour(path: &Path) -> Option<DateTime<Utc>> {
    let name = path.file_name()?.to_str()?;
    let month_dir = path.parent()?.file_name()?.to_str()?;

    let caps = HOUR_FILE.captures(name)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let hour: u32 = caps[4].parse().ok()?;

    if month_dir != format!("{}{}", &caps[1], &caps[2]) {
        return None;
    }

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}
