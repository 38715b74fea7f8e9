//! Byte sinks: anything that accepts a buffer and reports bytes written.
//!
//! `std::io::Write` needs `&mut self`, which does not fit a sink shared by
//! every thread in the process. [`ByteSink`] is the `&self` counterpart; the
//! implementations here do their own synchronisation.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::writer::RotatingFileWriter;

/// A shared destination for bytes.
pub trait ByteSink: Send + Sync {
    /// Writes `buf`, returning how many bytes were accepted.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

impl ByteSink for RotatingFileWriter {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&self) -> io::Result<()> {
        self.flush_current()
    }
}

impl<T: ByteSink + ?Sized> ByteSink for Arc<T> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Adapts any `io::Write` (a `Vec<u8>`, a socket, a file) into a shared sink.
impl<W: Write + Send> ByteSink for Mutex<W> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.write(buf)
    }

    fn flush(&self) -> io::Result<()> {
        let mut inner = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.flush()
    }
}

/// Which standard stream a [`Console`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Standard output or standard error.
///
/// Each write takes the stream lock and writes the whole buffer, so lines from
/// different threads do not interleave mid-line.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    stream: Stream,
}

impl Console {
    pub fn stdout() -> Self {
        Console {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Console {
            stream: Stream::Stderr,
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl ByteSink for Console {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            Stream::Stdout => io::stdout().lock().write_all(buf)?,
            Stream::Stderr => io::stderr().lock().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }
}

/// Forwards every write to each inner sink in order.
///
/// Stops at the first sink that fails or accepts fewer bytes than offered, and
/// reports that as the result; later sinks do not see the write.
#[derive(Clone, Default)]
pub struct FanOut {
    sinks: Vec<Arc<dyn ByteSink>>,
}

impl FanOut {
    pub fn new() -> Self {
        FanOut::default()
    }

    pub fn with(mut self, sink: Arc<dyn ByteSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn push(&mut self, sink: Arc<dyn ByteSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for FanOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOut")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl ByteSink for FanOut {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        for sink in &self.sinks {
            let n = sink.write(buf)?;
            if n != buf.len() {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "short write"));
            }
        }
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        for sink in &self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
