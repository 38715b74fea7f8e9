//! Level-gated line logger over a shared byte sink.
//!
//! Each enabled call produces exactly one line and one sink write:
//!
//! ```text
//! 2024/03/05 10:15:00.123456 [INFO]  src/main.rs:12 --> message
//! ```
//!
//! Calls below the threshold return before anything is formatted. Sink
//! errors are dropped; a failing log destination never reaches the caller.

use std::fmt::{self, Display, Write as _};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::level::Level;
use crate::location::CallSite;
use crate::sink::ByteSink;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

pub struct LeveledLogger {
    threshold: AtomicU8,
    sink: Arc<dyn ByteSink>,
    clock: Arc<dyn Clock>,
}

impl LeveledLogger {
    pub fn new(threshold: Level, sink: Arc<dyn ByteSink>) -> Self {
        Self::with_clock(threshold, sink, Arc::new(SystemClock))
    }

    pub fn with_clock(threshold: Level, sink: Arc<dyn ByteSink>, clock: Arc<dyn Clock>) -> Self {
        LeveledLogger {
            threshold: AtomicU8::new(threshold as u8),
            sink,
            clock,
        }
    }

    /// Changes the minimum level. Calls already past the check are unaffected.
    pub fn set_threshold(&self, level: Level) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    pub fn threshold(&self) -> Level {
        Level::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 >= self.threshold.load(Ordering::Relaxed)
    }

    /// The sink lines are written to.
    pub fn sink(&self) -> &Arc<dyn ByteSink> {
        &self.sink
    }

    /// Emits `message` at `level`, tagged with the caller's location.
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Display) {
        if !self.enabled(level) {
            return;
        }
        self.write_line(level, CallSite::caller(), format_args!("{message}"));
    }

    /// Emits pre-built format arguments. Used by the `debug!`..`error!` macros.
    #[track_caller]
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.write_line(level, CallSite::caller(), args);
    }

    /// Emits with an explicit call site instead of the caller's.
    pub fn log_at(&self, level: Level, site: CallSite, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.write_line(level, site, args);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.log(Level::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.log(Level::Info, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Display) {
        self.log(Level::Warn, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.log(Level::Error, message);
    }

    fn write_line(&self, level: Level, site: CallSite, args: fmt::Arguments<'_>) {
        let line = self.format_line(level, site, args);
        let _ = self.sink.write(line.as_bytes());
    }

    fn format_line(&self, level: Level, site: CallSite, args: fmt::Arguments<'_>) -> String {
        let mut line = String::with_capacity(96);
        // Writing into a String cannot fail.
        let _ = write!(
            line,
            "{} {} {} --> {}",
            self.clock.now().format(TIMESTAMP_FORMAT),
            level.tag(),
            site,
            args
        );
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}

impl fmt::Debug for LeveledLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeveledLogger")
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{DateTime, Utc};
    use std::cell::Cell;
    use std::io;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// Records each write as one entry so tests can count sink calls.
    #[derive(Default)]
    struct Recorder {
        writes: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl ByteSink for Recorder {
        fn write(&self, buf: &[u8]) -> io::Result<usize> {
            self.writes
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }
    }

    struct AlwaysFails {
        attempts: AtomicUsize,
    }

    impl ByteSink for AlwaysFails {
        fn write(&self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::other("sink is broken"))
        }
    }

    /// Display impl that counts how often it is formatted.
    struct Counted<'a>(&'a Cell<u32>);

    impl Display for Counted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.set(self.0.get() + 1);
            f.write_str("counted")
        }
    }

    fn fixed_clock() -> Arc<ManualClock> {
        let at = DateTime::parse_from_rfc3339("2024-03-05T10:15:00.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        Arc::new(ManualClock::new(at))
    }

    fn logger(threshold: Level) -> (LeveledLogger, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let logger = LeveledLogger::with_clock(threshold, recorder.clone(), fixed_clock());
        (logger, recorder)
    }

    #[test]
    fn test_gating_matrix() {
        for threshold in Level::ALL {
            for level in Level::ALL {
                let (logger, recorder) = logger(threshold);
                logger.log(level, "msg");
                let emitted = recorder.writes().len() == 1;
                assert_eq!(
                    emitted,
                    level >= threshold,
                    "level {level} with threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn test_line_layout() {
        let (logger, recorder) = logger(Level::Debug);
        let line_no = line!() + 1;
        logger.info("server started");

        let writes = recorder.writes();
        let expected = format!(
            "2024/03/05 10:15:00.123456 [INFO]  {}:{} --> server started\n",
            file!(),
            line_no
        );
        assert_eq!(writes, vec![expected]);
    }

    #[test]
    fn test_each_level_method_uses_its_tag() {
        let (logger, recorder) = logger(Level::Debug);
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");

        let writes = recorder.writes();
        assert_eq!(writes.len(), 4);
        assert!(writes[0].contains("[DEBUG] "));
        assert!(writes[1].contains("[INFO]  "));
        assert!(writes[2].contains("[WARN]  "));
        assert!(writes[3].contains("[ERROR] "));
    }

    #[test]
    fn test_one_sink_write_per_emit_even_for_multiline_messages() {
        let (logger, recorder) = logger(Level::Debug);
        logger.warn("first\nsecond");
        assert_eq!(recorder.writes().len(), 1);
    }

    #[test]
    fn test_trailing_newline_is_not_doubled() {
        let (logger, recorder) = logger(Level::Debug);
        logger.info("already terminated\n");
        let writes = recorder.writes();
        assert!(writes[0].ends_with("already terminated\n"));
        assert!(!writes[0].ends_with("\n\n"));
    }

    #[test]
    fn test_gated_out_message_is_never_formatted() {
        let (logger, recorder) = logger(Level::Warn);
        let count = Cell::new(0);

        logger.debug(Counted(&count));
        logger.log_fmt(Level::Info, format_args!("{}", Counted(&count)));

        assert_eq!(count.get(), 0);
        assert!(recorder.writes().is_empty());

        logger.error(Counted(&count));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_threshold_change_applies_to_later_calls() {
        let (logger, recorder) = logger(Level::Error);
        logger.info("dropped");
        logger.set_threshold(Level::Info);
        assert_eq!(logger.threshold(), Level::Info);
        logger.info("kept");

        let writes = recorder.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].ends_with("--> kept\n"));
    }

    #[test]
    fn test_failing_sink_is_silent() {
        let sink = Arc::new(AlwaysFails {
            attempts: AtomicUsize::new(0),
        });
        let logger = LeveledLogger::new(Level::Debug, sink.clone());

        logger.error("nobody will see this");
        logger.info("or this");

        assert_eq!(sink.attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_log_at_uses_given_site() {
        let (logger, recorder) = logger(Level::Debug);
        logger.log_at(
            Level::Info,
            CallSite::new("worker.rs", 7),
            format_args!("job {}", 3),
        );
        assert!(recorder.writes()[0].contains("[INFO]  worker.rs:7 --> job 3\n"));
    }
}
