//! Hourly rotating file writer.
//!
//! Writes land in `<base>/<YYYYMM>/<YYYYMMDD_HH>.txt`, where the month
//! directory and hour file come from the UTC time of the write. The directory
//! is created on demand and the file is opened for append.
//!
//! # Concurrency
//!
//! The open file and the hour bucket it belongs to are published together as
//! one `Arc<Current>` through an [`ArcSwapOption`]. A write loads that pair
//! without locking and, when the bucket matches, appends straight away. Only
//! when the pair is missing or stale does the writer take `rotate_lock`,
//! re-check, and open the next file. Rotation happens at most once per hour,
//! so the lock is almost never contended.
//!
//! The bucket only moves forward. A write whose clock reading falls in an
//! earlier hour than the open file (clock stepped back, or a thread that read
//! the time just before another thread rotated) appends to the open file.
//!
//! A replaced file is closed when the last in-flight write holding it
//! finishes. Close errors are ignored (`File`'s `Drop` discards them).
//!
//! Nothing coordinates separate processes sharing one base directory.

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use fs_err as fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::clock::{hour_bucket, Clock, SystemClock};

struct Current {
    bucket: i64,
    path: PathBuf,
    file: std::fs::File,
}

/// Append-only sink that switches files whenever the UTC hour changes.
///
/// Share it behind an `Arc`; every operation takes `&self`.
pub struct RotatingFileWriter {
    base_dir: PathBuf,
    clock: Arc<dyn Clock>,
    current: ArcSwapOption<Current>,
    rotate_lock: Mutex<()>,
    rotations: AtomicU64,
}

impl RotatingFileWriter {
    /// Creates a writer rooted at `base_dir`. No file is touched until the
    /// first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(base_dir, Arc::new(SystemClock))
    }

    pub fn with_clock(base_dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        RotatingFileWriter {
            base_dir: base_dir.into(),
            clock,
            current: ArcSwapOption::empty(),
            rotate_lock: Mutex::new(()),
            rotations: AtomicU64::new(0),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file currently open, if any write has happened yet.
    pub fn current_path(&self) -> Option<PathBuf> {
        self.current.load_full().map(|c| c.path.clone())
    }

    /// Number of times a file has been opened (first open plus rotations).
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    /// Runs the rotation check without writing anything and returns the path
    /// writes would go to now. Useful for failing fast at startup.
    pub fn open_current(&self) -> io::Result<PathBuf> {
        let current = self.current_for(&self.clock.now())?;
        Ok(current.path.clone())
    }

    /// Resolves the file for `at` under `base_dir`.
    pub fn path_for(base_dir: &Path, at: &DateTime<Utc>) -> PathBuf {
        base_dir
            .join(at.format("%Y%m").to_string())
            .join(format!("{}.txt", at.format("%Y%m%d_%H")))
    }

    /// Returns the handle for the hour containing `now`, opening the next file
    /// when the hour has moved forward.
    fn current_for(&self, now: &DateTime<Utc>) -> io::Result<Arc<Current>> {
        let bucket = hour_bucket(now);

        // Fast path: no lock.
        if let Some(current) = &*self.current.load() {
            if current.bucket >= bucket {
                return Ok(Arc::clone(current));
            }
        }

        let rotated = {
            let _guard = self
                .rotate_lock
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            // Another thread may have rotated while we waited.
            if let Some(current) = &*self.current.load() {
                if current.bucket >= bucket {
                    return Ok(Arc::clone(current));
                }
            }

            let next = Arc::new(self.open(bucket, now)?);
            // The old handle is dropped (and closed) once no writer holds it.
            self.current.store(Some(Arc::clone(&next)));
            self.rotations.fetch_add(1, Ordering::Relaxed);
            next
        };

        tracing::debug!(
            path = %rotated.path.display(),
            bucket = rotated.bucket,
            "Opened log file"
        );
        Ok(rotated)
    }

    fn open(&self, bucket: i64, now: &DateTime<Utc>) -> io::Result<Current> {
        let path = Self::path_for(&self.base_dir, now);
        if let Some(dir) = path.parent() {
            if !dir.is_dir() {
                fs::create_dir_all(dir)?;
            }
        }

        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let (file, path) = file.into_parts();

        Ok(Current { bucket, path, file })
    }

    /// Appends `buf` to the file for the current hour.
    ///
    /// Returns the byte count and error of the underlying `write` unchanged.
    pub fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let current = self.current_for(&self.clock.now())?;
        (&current.file).write(buf)
    }

    pub fn flush_current(&self) -> io::Result<()> {
        match &*self.current.load() {
            Some(current) => (&current.file).flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("base_dir", &self.base_dir)
            .field("current_path", &self.current_path())
            .field("rotations", &self.rotations())
            .finish()
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_current()
    }
}

impl Write for &RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_current()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for RotatingFileWriter {
    type Writer = &'a RotatingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}
